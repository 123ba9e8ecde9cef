//! Default task checklists for each order template kind.
//!
//! When an order is created, the tasks listed here for its template kind are
//! copied onto the order in exactly this sequence. The order of each list is
//! the workflow operators follow, so entries must not be reordered casually.

use crate::entities::TemplateKind;
use serde::Serialize;
use tracing::warn;

/// One default task: what gets copied into a new `Task` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskDefinition {
    /// Task name
    pub name: &'static str,
    /// Task description
    pub description: &'static str,
}

const fn def(name: &'static str, description: &'static str) -> TaskDefinition {
    TaskDefinition { name, description }
}

const MONUMENT_INSTALLATION: [TaskDefinition; 12] = [
    def(
        "Zdjęcie miejsca przed",
        "Zrobić zdjęcie miejsca pochówku przed rozpoczęciem prac",
    ),
    def(
        "Pomiar miejsca",
        "Zmierzyć grób i sąsiednie nagrobki, sprawdzić dojazd",
    ),
    def(
        "Projekt nagrobka",
        "Przygotować projekt i uzyskać akceptację klienta",
    ),
    def(
        "Zamówienie kamienia",
        "Zamówić płyty i elementy w wybranym materiale",
    ),
    def(
        "Zgłoszenie w zarządzie cmentarza",
        "Zgłosić prace i uiścić opłatę cmentarną",
    ),
    def(
        "Demontaż starego nagrobka",
        "Rozebrać i wywieźć stary nagrobek, jeśli występuje",
    ),
    def("Wykonanie fundamentu", "Wylać fundament pod nagrobek"),
    def(
        "Obróbka kamienia",
        "Przyciąć, wypolerować i przygotować elementy do montażu",
    ),
    def(
        "Wykonanie napisów",
        "Wykuć lub wygrawerować litery zgodnie z rozkładem treści",
    ),
    def("Transport na cmentarz", "Przewieźć elementy na miejsce montażu"),
    def(
        "Montaż nagrobka",
        "Zmontować nagrobek, zamocować lampion, wazon i akcesoria",
    ),
    def(
        "Zdjęcie miejsca po",
        "Zrobić zdjęcie gotowego nagrobka i posprzątać teren",
    ),
];

const CLADDING: [TaskDefinition; 7] = [
    def(
        "Zdjęcie miejsca przed",
        "Zrobić zdjęcie terenu wokół grobu przed pracami",
    ),
    def("Pomiar powierzchni", "Zmierzyć powierzchnię do obłożenia w m²"),
    def("Zamówienie materiału", "Zamówić płyty obłożeniowe i krawężniki"),
    def("Przygotowanie podłoża", "Wyrównać i utwardzić podłoże"),
    def("Układanie płyt", "Ułożyć płyty obłożenia i krawężniki"),
    def("Fugowanie i czyszczenie", "Zafugować spoiny i oczyścić kamień"),
    def("Zdjęcie miejsca po", "Zrobić zdjęcie gotowego obłożenia"),
];

const MONUMENT_RAISING: [TaskDefinition; 8] = [
    def(
        "Zdjęcie miejsca przed",
        "Udokumentować stan nagrobka przed pracami",
    ),
    def(
        "Ocena stanu nagrobka",
        "Sprawdzić osiadanie, pęknięcia i stan fundamentu",
    ),
    def(
        "Zgłoszenie w zarządzie cmentarza",
        "Zgłosić prace na terenie cmentarza",
    ),
    def(
        "Demontaż elementów",
        "Zdjąć płytę, tablicę i akcesoria, zabezpieczyć je",
    ),
    def("Wzmocnienie fundamentu", "Podbić lub wylać nowy fundament"),
    def(
        "Podniesienie i poziomowanie",
        "Podnieść nagrobek i wypoziomować elementy",
    ),
    def(
        "Ponowny montaż elementów",
        "Zamontować zdjęte elementy i akcesoria",
    ),
    def("Zdjęcie miejsca po", "Zrobić zdjęcie po zakończeniu prac"),
];

const POST_FUNERAL_INSCRIPTION: [TaskDefinition; 7] = [
    def(
        "Ustalenie treści dopiski",
        "Spisać z klientem treść, daty i rodzaj liter",
    ),
    def(
        "Akceptacja rozkładu treści",
        "Przygotować rozkład treści na tablicy i uzyskać akceptację",
    ),
    def(
        "Zgłoszenie w zarządzie cmentarza",
        "Zgłosić prace na terenie cmentarza",
    ),
    def(
        "Demontaż tablicy",
        "Zdjąć tablicę i przewieźć do zakładu, jeśli wymaga tego dopiska",
    ),
    def(
        "Wykonanie dopiski",
        "Wykuć lub wygrawerować dopiskę i pomalować litery",
    ),
    def("Montaż tablicy", "Zamontować tablicę z powrotem na nagrobku"),
    def("Zdjęcie po wykonaniu", "Zrobić zdjęcie tablicy z dopiską"),
];

const EXHUMATION: [TaskDefinition; 8] = [
    def(
        "Zgoda sanepidu",
        "Uzyskać decyzję inspektora sanitarnego na ekshumację",
    ),
    def(
        "Zgłoszenie w zarządzie cmentarza",
        "Uzgodnić ekshumację z zarządem cmentarza",
    ),
    def(
        "Ustalenie terminu",
        "Ustalić termin z zakładem pogrzebowym i rodziną",
    ),
    def("Zdjęcie miejsca przed", "Udokumentować stan grobu przed pracami"),
    def("Demontaż nagrobka", "Rozebrać nagrobek i zabezpieczyć elementy"),
    def(
        "Przeprowadzenie ekshumacji",
        "Wykonać ekshumację w obecności uprawnionych osób",
    ),
    def("Uporządkowanie miejsca", "Zasypać grób i uprzątnąć teren"),
    def("Zdjęcie miejsca po", "Zrobić zdjęcie miejsca po zakończeniu prac"),
];

/// Returns the default tasks for a template kind, in workflow order.
///
/// The free-form "new template" kind has no defaults and yields an empty slice.
#[must_use]
pub const fn get_default_tasks(kind: TemplateKind) -> &'static [TaskDefinition] {
    match kind {
        TemplateKind::MonumentInstallation => &MONUMENT_INSTALLATION,
        TemplateKind::Cladding => &CLADDING,
        TemplateKind::MonumentRaising => &MONUMENT_RAISING,
        TemplateKind::PostFuneralInscription => &POST_FUNERAL_INSCRIPTION,
        TemplateKind::Exhumation => &EXHUMATION,
        TemplateKind::NewTemplate => &[],
    }
}

/// Like [`get_default_tasks`], but for a raw template slug.
///
/// An unknown slug yields an empty list, the same as a free-form template.
/// A warning is logged so a misconfigured template does not go unnoticed.
#[must_use]
pub fn default_tasks_for_slug(slug: &str) -> &'static [TaskDefinition] {
    if let Some(kind) = TemplateKind::from_slug(slug) {
        get_default_tasks(kind)
    } else {
        warn!(slug, "Unknown order template kind, no default tasks");
        &[]
    }
}
