//! Settings pages: one form per page of configuration keys.

use askama::Template;
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use wvadmin_app::ports::{ArchiveStatistics, ConfigStore, HostSystem};
use wvadmin_app::services::settings_service::SettingsPage;
use wvadmin_domain::error::AdminError;
use wvadmin_domain::settings::{FieldKind, FieldValue, PageId};

use crate::error::DashboardError;
use crate::state::AppState;

pub struct ChoiceView {
    value: String,
    label: String,
    selected: bool,
}

/// One form row.
pub struct FieldView {
    name: String,
    label: String,
    help: String,
    /// `text`, `password`, `checkbox`, `radio` or `select`.
    widget: &'static str,
    value: String,
    checked: bool,
    choices: Vec<ChoiceView>,
    row_id: String,
    visible: bool,
}

impl From<FieldValue> for FieldView {
    fn from(field: FieldValue) -> Self {
        let checked = field.is_checked();
        let choices = match &field.spec.kind {
            FieldKind::Radio(choices) | FieldKind::Select(choices) => choices
                .iter()
                .map(|choice| ChoiceView {
                    value: choice.value.clone(),
                    label: choice.label.clone(),
                    selected: field.is_selected(&choice.value),
                })
                .collect(),
            FieldKind::Text | FieldKind::Password | FieldKind::Checkbox => Vec::new(),
        };
        let widget = match field.spec.kind {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio(_) => "radio",
            FieldKind::Select(_) => "select",
        };

        Self {
            name: field.spec.name,
            label: field.spec.label,
            help: field.spec.help.unwrap_or_default(),
            widget,
            value: field.value,
            checked,
            choices,
            row_id: field
                .spec
                .row
                .map(|row| row.dom_id().to_string())
                .unwrap_or_default(),
            visible: field.visible,
        }
    }
}

/// Consecutive fields sharing a heading.
pub struct SectionView {
    title: String,
    fields: Vec<FieldView>,
}

fn sections(fields: Vec<FieldValue>) -> Vec<SectionView> {
    let mut sections: Vec<SectionView> = Vec::new();
    for field in fields {
        match sections.last_mut() {
            Some(section) if section.title == field.spec.section => {
                section.fields.push(field.into());
            }
            _ => sections.push(SectionView {
                title: field.spec.section.clone(),
                fields: vec![field.into()],
            }),
        }
    }
    sections
}

/// Settings page template.
#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    title: &'static str,
    slug: &'static str,
    station: &'static str,
    note: &'static str,
    device_missing: bool,
    sections: Vec<SectionView>,
}

impl From<SettingsPage> for SettingsTemplate {
    fn from(page: SettingsPage) -> Self {
        Self {
            title: page.page.title(),
            slug: page.page.slug(),
            station: page
                .station
                .map_or("Not configured", |station| station.label()),
            note: page.note.unwrap_or_default(),
            device_missing: page.device_missing,
            sections: sections(page.fields),
        }
    }
}

impl IntoResponse for SettingsTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

fn page_id(slug: &str) -> Result<PageId, DashboardError> {
    PageId::from_slug(slug).map_err(|err| DashboardError::from(AdminError::from(err)))
}

/// `GET /settings/{page}`
pub async fn show<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    Path(slug): Path<String>,
) -> Result<SettingsTemplate, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let page = page_id(&slug)?;
    let loaded = state.settings_service.load_page(page).await?;
    Ok(loaded.into())
}

/// `POST /settings/{page}`: persist the form and show it again (PRG).
pub async fn save<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    Path(slug): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let page = page_id(&slug)?;
    state
        .settings_service
        .save_page(page, &super::submission(pairs))
        .await?;
    Ok(Redirect::to(&format!("/settings/{}", page.slug())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wvadmin_domain::settings::render_values;

    #[test]
    fn should_group_consecutive_fields_by_section() {
        let fields = render_values(PageId::Ftp, &HashMap::new());
        let total = fields.len();

        let grouped = sections(fields);

        assert_eq!(grouped.iter().map(|s| s.fields.len()).sum::<usize>(), total);
        for pair in grouped.windows(2) {
            assert_ne!(pair[0].title, pair[1].title);
        }
    }

    #[test]
    fn should_mark_selected_station_choice() {
        let values = HashMap::from([("STATION_TYPE".to_string(), "TWI".to_string())]);
        let fields = render_values(PageId::Station, &values);
        let station = fields
            .into_iter()
            .map(FieldView::from)
            .find(|field| field.name == "field_Station_Type")
            .unwrap();

        assert_eq!(station.widget, "select");
        let selected: Vec<&str> = station
            .choices
            .iter()
            .filter(|choice| choice.selected)
            .map(|choice| choice.value.as_str())
            .collect();
        assert_eq!(selected.len(), 1);
    }
}
