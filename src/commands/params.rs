//! Params command handler

use anyhow::Result;

use funcstack::domain::entities::ParameterSummary;
use funcstack::stack::ProjectStack;

use crate::ui::json::emit_event;
use crate::ui::UiContext;

pub fn cmd_params(ui: &UiContext) -> Result<()> {
    let summaries: Vec<ParameterSummary> = ProjectStack::parameters()
        .iter()
        .map(|p| p.summary())
        .collect();

    if ui.json {
        emit_event(&serde_json::json!({
            "event": "data",
            "command": "params",
            "parameters": summaries,
        }))?;
        return Ok(());
    }

    print!("{}", render_table(&summaries));
    Ok(())
}

fn render_table(summaries: &[ParameterSummary]) -> String {
    let name_width = summaries
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let type_width = summaries
        .iter()
        .map(|s| s.ty.len())
        .max()
        .unwrap_or(0)
        .max("TYPE".len());

    let mut out = format!(
        "{:<name_width$}  {:<type_width$}  DEFAULT\n",
        "NAME", "TYPE"
    );
    for summary in summaries {
        let default = match &summary.default {
            None => "(required)".to_string(),
            Some(serde_json::Value::Null) => "-".to_string(),
            Some(value) => value.to_string(),
        };
        out.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {}\n",
            summary.name, summary.ty, default
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_marks_required_and_unset() {
        let summaries: Vec<ParameterSummary> = ProjectStack::parameters()
            .iter()
            .map(|p| p.summary())
            .collect();
        let table = render_table(&summaries);

        let direction = table.lines().find(|l| l.starts_with("direction ")).unwrap();
        assert!(direction.ends_with("(required)"));

        let image = table.lines().find(|l| l.starts_with("image ")).unwrap();
        assert!(image.ends_with(" -"));

        assert!(table.starts_with("NAME"));
    }
}
