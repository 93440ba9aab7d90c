use panel::config::PanelConfig;
use panel::EntityKind;
use yew::prelude::*;

/// Properties for the `EntityPage`.
#[derive(Properties, PartialEq, Clone)]
pub struct EntityPageProps {
    /// Content type managed by the page. Changing it remounts the page.
    pub kind: EntityKind,
    pub config: PanelConfig,
}
