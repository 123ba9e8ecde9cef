//! Order template rows.
//!
//! Every [`TemplateKind`] has exactly one row in `order_templates`. The rows
//! are created at start-up from the catalog config; afterwards only their
//! descriptions change.

use crate::{
    config::catalog::Config,
    entities::{OrderTemplate, TemplateKind, order_template},
    errors::{Error, Result},
};
use sea_orm::{Iterable, QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Makes sure every template kind has a row.
///
/// Missing rows are inserted with the description from `config`; existing
/// rows are left alone. Returns how many rows were inserted.
#[instrument(skip(db, config))]
pub async fn ensure_order_templates(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut inserted = 0;

    for kind in TemplateKind::iter() {
        let exists = OrderTemplate::find()
            .filter(order_template::Column::Kind.eq(kind))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let model = order_template::ActiveModel {
            kind: Set(kind),
            description: Set(config.template_description(kind).map(ToString::to_string)),
            ..Default::default()
        };
        model.insert(db).await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!(inserted, "Order templates created");
    }
    Ok(inserted)
}

/// Retrieves the template row for a kind.
pub async fn get_template_by_kind(
    db: &DatabaseConnection,
    kind: TemplateKind,
) -> Result<order_template::Model> {
    OrderTemplate::find()
        .filter(order_template::Column::Kind.eq(kind))
        .one(db)
        .await?
        .ok_or_else(|| Error::TemplateKindNotFound { kind: kind.slug() })
}

/// Retrieves a template row by its unique ID.
pub async fn get_template_by_id(
    db: &DatabaseConnection,
    template_id: i64,
) -> Result<Option<order_template::Model>> {
    OrderTemplate::find_by_id(template_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every template row in id order.
pub async fn get_all_templates(db: &DatabaseConnection) -> Result<Vec<order_template::Model>> {
    OrderTemplate::find()
        .order_by_asc(order_template::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Changes the description shown for a template. Blank clears it.
pub async fn update_template_description(
    db: &DatabaseConnection,
    kind: TemplateKind,
    description: Option<String>,
) -> Result<order_template::Model> {
    let mut template: order_template::ActiveModel = get_template_by_kind(db, kind).await?.into();
    template.description = Set(description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty()));
    template.update(db).await.map_err(Into::into)
}
