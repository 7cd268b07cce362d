//! Graph command handler
//!
//! Lists declarations in dependency order with their dependencies and
//! attributes. Secret attributes are masked.

use anyhow::Result;
use crossterm::style::Stylize;

use funcstack::config::Config;
use funcstack::domain::entities::Declaration;
use funcstack::domain::services::DeclarationGraph;

use crate::cli::InputArgs;
use crate::commands::pipeline;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, DeclarationEvent, StartEvent};
use crate::ui::theme::colors;
use crate::ui::UiContext;

const COMMAND: &str = "graph";

pub fn cmd_graph(ui: &UiContext, mut config: Config, inputs: &InputArgs) -> Result<()> {
    pipeline::apply_overrides(&mut config, inputs, None);

    if ui.json {
        emit_event(&StartEvent::new(COMMAND))?;
    }

    let composed = pipeline::compose(ui, COMMAND, &config, inputs)?;
    let ordered = composed.graph.topological_order()?;

    if ui.json {
        for declaration in &ordered {
            emit_event(&declaration_event(declaration))?;
        }
        for output in composed.graph.outputs() {
            emit_event(&serde_json::json!({
                "event": "output",
                "command": COMMAND,
                "name": output.name(),
                "value": output.value().to_masked_json(),
                "sensitive": output.is_sensitive(),
            }))?;
        }
        emit_event(&CompleteEvent::success(COMMAND))?;
        return Ok(());
    }

    print!("{}", render_graph(&ordered, &composed.graph, ui.color));
    Ok(())
}

fn declaration_event(declaration: &Declaration) -> DeclarationEvent<'static> {
    DeclarationEvent {
        event: "declaration",
        command: COMMAND,
        address: declaration.address().to_string(),
        kind: declaration.kind().terraform_type(),
        name: declaration.address().name().to_string(),
        depends_on: declaration
            .dependencies()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
        attributes: serde_json::Value::Object(
            declaration
                .attributes()
                .iter()
                .map(|(k, v)| (k.clone(), v.to_masked_json()))
                .collect(),
        ),
    }
}

fn render_graph(ordered: &[&Declaration], graph: &DeclarationGraph, color: bool) -> String {
    let mut out = String::new();

    for declaration in ordered {
        let address = declaration.address().to_string();
        if color {
            out.push_str(&address.as_str().with(colors::INFO).to_string());
        } else {
            out.push_str(&address);
        }
        out.push('\n');

        let deps: Vec<String> = declaration
            .dependencies()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        if !deps.is_empty() {
            out.push_str(&format!("  depends on: {}\n", deps.join(", ")));
        }

        for (key, value) in declaration.attributes() {
            out.push_str(&format!("  {} = {}\n", key, value.display()));
        }
    }

    for output in graph.outputs() {
        out.push_str(&format!(
            "output.{} = {}\n",
            output.name(),
            output.value().display()
        ));
    }

    out
}
