//! Admin form variants and the response handed to the template renderer.

use serde::Serialize;

use super::{SettingsAggregator, SettingsError};
use crate::app_data::updater_data;

/// Where the settings are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    /// Editable form in the server settings
    Server,
    /// Read-only summary on the overview page
    Overview,
}

impl FormVariant {
    pub const ALL: [FormVariant; 2] = [FormVariant::Server, FormVariant::Overview];

    /// Settings section this form is registered in
    pub fn section(&self) -> &'static str {
        match self {
            FormVariant::Server => "server",
            FormVariant::Overview => "overview",
        }
    }

    /// Ordering weight within the section, higher comes first
    pub fn priority(&self) -> u32 {
        match self {
            FormVariant::Server => 90,
            FormVariant::Overview => 50,
        }
    }

    /// Whether the form offers editable controls
    pub fn with_settings(&self) -> bool {
        matches!(self, FormVariant::Server)
    }
}

/// Parameters passed to the `admin` template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormParams {
    /// Serialized settings payload
    pub json: String,
    #[serde(rename = "withSettings")]
    pub with_settings: bool,
}

/// A template to render with its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateResponse {
    pub app_name: String,
    pub template: String,
    pub params: FormParams,
    /// Page chrome to render around the template, empty for a bare fragment
    pub render_as: String,
}

/// The settings form for one variant
pub struct AdminForm<'a> {
    aggregator: SettingsAggregator<'a>,
    variant: FormVariant,
}

impl<'a> AdminForm<'a> {
    pub fn new(aggregator: SettingsAggregator<'a>, variant: FormVariant) -> Self {
        Self {
            aggregator,
            variant,
        }
    }

    pub fn section(&self) -> &'static str {
        self.variant.section()
    }

    pub fn priority(&self) -> u32 {
        self.variant.priority()
    }

    /// Build the settings and wrap them for rendering
    pub fn form(&self) -> Result<TemplateResponse, SettingsError> {
        let data = updater_data();
        let with_settings = self.variant.with_settings();
        let payload = self.aggregator.build_settings(with_settings)?;

        tracing::debug!(
            "Rendering {} form (priority {}, {} notify groups)",
            self.section(),
            self.priority(),
            payload.notify_groups.len()
        );

        Ok(TemplateResponse {
            app_name: data.apps.updatenotification.clone(),
            template: data.form.template.clone(),
            params: FormParams {
                json: payload.to_json()?,
                with_settings,
            },
            render_as: String::new(),
        })
    }
}
