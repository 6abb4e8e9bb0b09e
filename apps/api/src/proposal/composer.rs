//! Field composer: turns a generation request (plus an optional selected
//! project) into the ordered, labeled blocks presented to the model.
//!
//! Block order is fixed: CLIENTE, PROJETO, VALOR, PRAZO, then only the optional
//! blocks that are present: PONTOS ADICIONAIS, PROJETO SELECIONADO, INSTRUÇÕES.

use thiserror::Error;

use crate::models::project::ProjectRow;
use crate::proposal::generator::{AmountInput, GenerationRequest};
use crate::proposal::markers::Marker;

#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
    #[error("Campo obrigatório ausente: {0}")]
    MissingField(&'static str),

    #[error("Valor inválido: '{0}' não é um número")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLabel {
    Client,
    Project,
    Value,
    Deadline,
    AdditionalPoints,
    ProjectSelected,
    Instructions,
}

impl FieldLabel {
    pub fn text(self) -> &'static str {
        match self {
            FieldLabel::Client => "CLIENTE:",
            FieldLabel::Project => "PROJETO:",
            FieldLabel::Value => "VALOR:",
            FieldLabel::Deadline => "PRAZO:",
            FieldLabel::AdditionalPoints => "PONTOS ADICIONAIS:",
            FieldLabel::ProjectSelected => "PROJETO SELECIONADO:",
            FieldLabel::Instructions => "INSTRUÇÕES:",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldBlock {
    pub label: FieldLabel,
    pub body: String,
}

impl FieldBlock {
    fn new(label: FieldLabel, body: impl Into<String>) -> Self {
        Self {
            label,
            body: body.into(),
        }
    }

    pub fn render(&self) -> String {
        format!("{} {}", Marker::Bold.wrap(self.label.text()), self.body)
    }
}

/// Project record folded into the prompt when the request selects one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub name: String,
    pub description: String,
}

impl From<ProjectRow> for ProjectContext {
    fn from(row: ProjectRow) -> Self {
        Self {
            name: row.name,
            description: row.description,
        }
    }
}

/// Output of composition: the ordered blocks plus the normalized values the
/// rest of the pipeline needs.
#[derive(Debug, Clone)]
pub struct ComposedFields {
    pub blocks: Vec<FieldBlock>,
    pub value: f64,
    /// Bulleted "DIFERENCIAIS INCLUSOS" artifact. Never injected into the prompt.
    pub differentiators: Option<String>,
}

impl ComposedFields {
    /// Renders every block, separated by a blank line.
    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(FieldBlock::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Trimmed client name from the CLIENTE block.
    pub fn client_name(&self) -> &str {
        self.blocks
            .iter()
            .find(|b| b.label == FieldLabel::Client)
            .map(|b| b.body.as_str())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn labels(&self) -> Vec<FieldLabel> {
        self.blocks.iter().map(|b| b.label).collect()
    }
}

/// Validates the request and assembles its blocks.
///
/// Fails before anything else happens when a required field is blank or the
/// value is not numeric.
pub fn compose(
    request: &GenerationRequest,
    project: Option<&ProjectContext>,
) -> Result<ComposedFields, ComposeError> {
    let client_name = required("clientName", &request.client_name)?;
    let description = required("projectDescription", &request.project_description)?;
    let value = parse_value(request.value.as_ref())?;
    let deadline = required("deadline", &request.deadline)?;

    let mut blocks = vec![
        FieldBlock::new(FieldLabel::Client, client_name),
        FieldBlock::new(FieldLabel::Project, description),
        FieldBlock::new(FieldLabel::Value, format_currency(value)),
        FieldBlock::new(FieldLabel::Deadline, deadline),
    ];

    let additional_points = non_blank(request.additional_points.as_deref());
    if let Some(points) = additional_points {
        blocks.push(FieldBlock::new(FieldLabel::AdditionalPoints, points));
    }

    if let Some(project) = project {
        blocks.push(FieldBlock::new(
            FieldLabel::ProjectSelected,
            format!("{}: {}", project.name.trim(), project.description.trim()),
        ));
    }

    if let Some(instructions) = non_blank(request.custom_prompt.as_deref()) {
        blocks.push(FieldBlock::new(FieldLabel::Instructions, instructions));
    }

    Ok(ComposedFields {
        blocks,
        value,
        differentiators: additional_points.and_then(format_differentiators),
    })
}

/// Parses the monetary value as a finite decimal.
pub fn parse_value(raw: Option<&AmountInput>) -> Result<f64, ComposeError> {
    let value = match raw {
        None => return Err(ComposeError::MissingField("value")),
        Some(AmountInput::Number(n)) => *n,
        Some(AmountInput::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Err(ComposeError::MissingField("value"));
            }
            s.parse::<f64>()
                .map_err(|_| ComposeError::InvalidValue(s.to_string()))?
        }
    };

    if !value.is_finite() {
        return Err(ComposeError::InvalidValue(value.to_string()));
    }
    Ok(value)
}

/// Fixed-point currency with exactly two decimals, e.g. `R$ 1500.50`.
pub fn format_currency(value: f64) -> String {
    format!("R$ {value:.2}")
}

/// Splits comma-separated points into a bullet list, one trimmed non-empty
/// item per line. Returns `None` when no item survives trimming.
pub fn format_differentiators(points: &str) -> Option<String> {
    let bullets: Vec<String> = points
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("• {p}"))
        .collect();

    if bullets.is_empty() {
        return None;
    }
    Some(format!("\n✅ DIFERENCIAIS INCLUSOS:\n{}\n", bullets.join("\n")))
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ComposeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ComposeError::MissingField(field));
    }
    Ok(value)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
