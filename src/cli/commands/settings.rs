//! Settings page commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::commands::formatter_for;
use crate::cli::output::{print_formatted, status_line, OutputFormat};
use updatenotification::host::Host;
use updatenotification::settings::{AdminForm, FormVariant, SettingsAggregator, SettingsPayload};
use updatenotification::update_state::CachedUpdateChecker;

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Render the settings form
    Show {
        /// Render the read-only overview instead of the server settings
        #[arg(long)]
        overview: bool,
    },

    /// List the settings sections and their priorities
    Sections,
}

#[derive(Serialize)]
struct SectionEntry {
    variant: FormVariant,
    section: &'static str,
    priority: u32,
    with_settings: bool,
}

pub fn run(command: SettingsCommands, format: OutputFormat) -> Result<()> {
    match command {
        SettingsCommands::Show { overview } => show(overview, format),
        SettingsCommands::Sections => sections(format),
    }
}

fn show(overview: bool, format: OutputFormat) -> Result<()> {
    let variant = if overview {
        FormVariant::Overview
    } else {
        FormVariant::Server
    };

    let host = Host::open()?;
    let updates = CachedUpdateChecker::new(&host);
    let formatter = formatter_for(host.config());
    let aggregator = SettingsAggregator::new(&host, &updates, &host, formatter.as_ref(), &host);

    match format {
        OutputFormat::Json => {
            let response = AdminForm::new(aggregator, variant).form()?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            let payload = aggregator.build_settings(variant.with_settings())?;
            println!("{}", summary(&payload, variant));
        }
    }

    Ok(())
}

fn summary(payload: &SettingsPayload, variant: FormVariant) -> String {
    let mut lines = vec![format!(
        "Section:        {} (priority {})",
        variant.section(),
        variant.priority()
    )];

    if payload.is_update_checked {
        lines.push(format!("Last checked:   {}", payload.last_checked));
    } else {
        lines.push("Last checked:   never".to_string());
    }

    if payload.is_new_version_available {
        lines.push(format!("New version:    {}", payload.new_version_string));
        if !payload.download_link.is_empty() {
            lines.push(format!("Download:       {}", payload.download_link));
        }
    } else {
        lines.push("New version:    none".to_string());
    }

    lines.push(format!(
        "Channel:        {} (available: {})",
        payload.current_channel,
        payload.channels.as_slice().join(", ")
    ));
    lines.push(status_line(payload.updater_enabled, "Web updater enabled"));
    lines.push(status_line(!payload.version_is_eol, "Version still supported"));

    if payload.with_settings {
        let server = if payload.is_default_update_server_url {
            format!("{} (default)", payload.update_server_url)
        } else {
            payload.update_server_url.clone()
        };
        lines.push(format!("Update server:  {}", server));

        let groups: Vec<_> = payload
            .notify_groups
            .iter()
            .map(|g| format!("{} ({})", g.label, g.value))
            .collect();
        lines.push(format!(
            "Notify groups:  {}",
            if groups.is_empty() {
                "<none>".to_string()
            } else {
                groups.join(", ")
            }
        ));
    }

    lines.join("\n")
}

fn sections(format: OutputFormat) -> Result<()> {
    let entries: Vec<SectionEntry> = FormVariant::ALL
        .iter()
        .map(|v| SectionEntry {
            variant: *v,
            section: v.section(),
            priority: v.priority(),
            with_settings: v.with_settings(),
        })
        .collect();

    print_formatted(&entries, format, |entries| {
        entries
            .iter()
            .map(|e| {
                format!(
                    "{:<10} priority {:>3}{}",
                    e.section,
                    e.priority,
                    if e.with_settings { "  (editable)" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    });

    Ok(())
}
