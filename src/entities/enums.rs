//! Enumerated column types shared by several entities.
//!
//! Every enum is stored as text using the slug the workshop has always used,
//! so existing rows and exports stay readable.

use sea_orm::ActiveEnum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of job an order template describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum TemplateKind {
    /// New monument installation
    #[sea_orm(string_value = "nagrobek")]
    #[serde(rename = "nagrobek")]
    MonumentInstallation,
    /// Cladding the grave surroundings
    #[sea_orm(string_value = "oblozenie")]
    #[serde(rename = "oblozenie")]
    Cladding,
    /// Raising and levelling an existing monument
    #[sea_orm(string_value = "podniesienie_nagrobka")]
    #[serde(rename = "podniesienie_nagrobka")]
    MonumentRaising,
    /// Adding an inscription after a funeral
    #[sea_orm(string_value = "dopiska_po_pogrzebie")]
    #[serde(rename = "dopiska_po_pogrzebie")]
    PostFuneralInscription,
    /// Exhumation
    #[sea_orm(string_value = "ekshumacja")]
    #[serde(rename = "ekshumacja")]
    Exhumation,
    /// Free-form template without default tasks
    #[sea_orm(string_value = "nowy_szablon")]
    #[serde(rename = "nowy_szablon")]
    NewTemplate,
}

impl TemplateKind {
    /// Stored slug for this kind, as written to `order_templates.kind`.
    #[must_use]
    pub fn slug(self) -> String {
        self.to_value()
    }

    /// Parses a stored slug. Returns `None` for anything not in the enum.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::try_from_value(&slug.trim().to_string()).ok()
    }

    /// Name shown to operators.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MonumentInstallation => "Nagrobek",
            Self::Cladding => "Obłożenie",
            Self::MonumentRaising => "Podniesienie nagrobka",
            Self::PostFuneralInscription => "Dopiska po pogrzebie",
            Self::Exhumation => "Ekshumacja",
            Self::NewTemplate => "Nowy Szablon",
        }
    }
}

/// Where an order is in its lifecycle. Any value may follow any other.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum OrderStatus {
    /// Price quote, not yet accepted
    #[default]
    #[sea_orm(string_value = "wycena")]
    #[serde(rename = "wycena")]
    Quote,
    /// Accepted for realisation
    #[sea_orm(string_value = "przyjete")]
    #[serde(rename = "przyjete")]
    Accepted,
    /// Work under way
    #[sea_orm(string_value = "realizacja")]
    #[serde(rename = "realizacja")]
    InProgress,
    /// Work done, waiting for the client to pay
    #[sea_orm(string_value = "platnosc")]
    #[serde(rename = "platnosc")]
    AwaitingPayment,
    /// Finished and archived
    #[sea_orm(string_value = "zakonczone")]
    #[serde(rename = "zakonczone")]
    Completed,
}

impl OrderStatus {
    /// Name shown to operators.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Quote => "Wycena",
            Self::Accepted => "Przyjęte do realizacji",
            Self::InProgress => "W realizacji",
            Self::AwaitingPayment => "Czeka na płatność",
            Self::Completed => "Zakończone",
        }
    }
}

/// Grave construction.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum GraveType {
    /// Earth grave
    #[default]
    #[sea_orm(string_value = "ziemna")]
    #[serde(rename = "ziemna")]
    Earth,
    /// Tomb with a vault
    #[sea_orm(string_value = "grobowiec")]
    #[serde(rename = "grobowiec")]
    Tomb,
}

/// Grave width class.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum GraveSize {
    /// Single grave
    #[default]
    #[sea_orm(string_value = "pojedynczy")]
    #[serde(rename = "pojedynczy")]
    Single,
    /// One-and-a-half grave
    #[sea_orm(string_value = "poltorak")]
    #[serde(rename = "poltorak")]
    OneAndHalf,
    /// Double grave
    #[sea_orm(string_value = "podwojny")]
    #[serde(rename = "podwojny")]
    Double,
}

/// How a client pays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card
    #[sea_orm(string_value = "card")]
    Card,
    /// Cash
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank transfer
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

impl PaymentMethod {
    /// Name shown to operators.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Card => "Karta",
            Self::Cash => "Gotówka",
            Self::Transfer => "Przelew",
        }
    }
}
