//! Rendering of dashboard pages as terminal tables, JSON or CSV.

use anyhow::{Context, Result, anyhow};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use eicu_analytics::stats::round_to;
use eicu_model::{
    CompositionRow, Distribution, GroupField, GroupKey, GroupMetrics, LengthOfStayMean,
};

use crate::pages::{DemographicsPage, LengthOfStayPage, PerformancePage, Report};

/// Output format of a rendered page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// One titled table of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub numeric: bool,
}

impl Column {
    fn text<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            numeric: false,
        }
    }

    fn number<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            numeric: true,
        }
    }
}

/// Pages that break down into tabular sections.
pub trait Sections {
    fn sections(&self) -> Vec<Section>;
}

pub fn render<P>(page: &P, format: OutputFormat) -> Result<String>
where
    P: Sections + Serialize,
{
    match format {
        OutputFormat::Table => Ok(render_tables(&page.sections())),
        OutputFormat::Json => serde_json::to_string_pretty(page).context("serialize page as JSON"),
        OutputFormat::Csv => render_csv(&page.sections()),
    }
}

pub fn render_tables(sections: &[Section]) -> String {
    let mut out = String::new();
    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&section.title);
        out.push('\n');
        let mut table = Table::new();
        table.set_header(
            section
                .columns
                .iter()
                .map(|column| header_cell(&column.name))
                .collect::<Vec<_>>(),
        );
        apply_table_style(&mut table);
        for (index, column) in section.columns.iter().enumerate() {
            if column.numeric {
                align_column(&mut table, index, CellAlignment::Right);
            }
        }
        if section.rows.is_empty() {
            table.add_row(vec![dim_cell("no rows")]);
        }
        for row in &section.rows {
            table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }
    out
}

/// Writes each section as its own CSV document, prefixed by a `section`
/// column and separated by a blank line.
pub fn render_csv(sections: &[Section]) -> Result<String> {
    let mut documents = Vec::with_capacity(sections.len());
    for section in sections {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let mut header = vec!["section"];
        header.extend(section.columns.iter().map(|column| column.name.as_str()));
        writer
            .write_record(&header)
            .with_context(|| format!("write CSV header for {}", section.title))?;
        for row in &section.rows {
            let mut record = vec![section.title.as_str()];
            record.extend(row.iter().map(String::as_str));
            writer
                .write_record(&record)
                .with_context(|| format!("write CSV row for {}", section.title))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("flush CSV output: {}", e.error()))?;
        documents.push(String::from_utf8(bytes).context("CSV output is not UTF-8")?);
    }
    Ok(documents.join("\n"))
}

/// Formats a number rounded to four decimals, without trailing zeros.
pub fn format_number(value: f64) -> String {
    let rounded = round_to(value, 4);
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn key_columns(fields: &[GroupField]) -> Vec<Column> {
    fields.iter().map(|field| Column::text(field.label())).collect()
}

fn key_cells(key: &GroupKey) -> Vec<String> {
    key.values().iter().map(ToString::to_string).collect()
}

fn metrics_section(title: String, field: GroupField, metrics: &[GroupMetrics]) -> Section {
    let mut columns = key_columns(&[field]);
    columns.extend([Column::text("Metric"), Column::number("Rate")]);
    let rows = metrics
        .iter()
        .map(|row| {
            let mut cells = key_cells(&row.group);
            cells.push(row.metric.to_string());
            cells.push(format_number(row.rate));
            cells
        })
        .collect();
    Section {
        title,
        columns,
        rows,
    }
}

fn length_of_stay_section(
    title: String,
    field: GroupField,
    means: &[LengthOfStayMean],
    with_ordinal: bool,
) -> Section {
    let mut columns = Vec::new();
    if with_ordinal {
        columns.push(Column::number("#"));
    }
    columns.extend(key_columns(&[field]));
    columns.extend([
        Column::text("Location"),
        Column::number("Mean (days)"),
        Column::number("Stays"),
    ]);
    let rows = means
        .iter()
        .map(|row| {
            let mut cells = Vec::new();
            if with_ordinal {
                cells.push(row.ordinal.to_string());
            }
            cells.extend(key_cells(&row.group));
            cells.push(row.location.to_string());
            cells.push(format_number(row.mean_days));
            cells.push(row.stays.to_string());
            cells
        })
        .collect();
    Section {
        title,
        columns,
        rows,
    }
}

fn composition_section(title: String, fields: &[GroupField], rows: &[CompositionRow]) -> Section {
    let mut columns = key_columns(fields);
    columns.extend([Column::number("Count"), Column::number("Share")]);
    let rows = rows
        .iter()
        .map(|row| {
            let mut cells = key_cells(&row.key);
            cells.push(row.count.to_string());
            cells.push(format_number(row.proportion));
            cells
        })
        .collect();
    Section {
        title,
        columns,
        rows,
    }
}

fn distribution_section(title: String, field: GroupField, rows: &[Distribution]) -> Section {
    let mut columns = key_columns(&[field]);
    columns.extend(
        ["Count", "Min", "Q1", "Median", "Q3", "Max"]
            .into_iter()
            .map(Column::number),
    );
    let rows = rows
        .iter()
        .map(|row| {
            let mut cells = key_cells(&row.group);
            cells.push(row.count.to_string());
            cells.extend(
                [row.min, row.q1, row.median, row.q3, row.max]
                    .into_iter()
                    .map(format_number),
            );
            cells
        })
        .collect();
    Section {
        title,
        columns,
        rows,
    }
}

impl Sections for PerformancePage {
    fn sections(&self) -> Vec<Section> {
        let threshold = Section {
            title: "Mortality threshold".to_string(),
            columns: vec![
                Column::text("Region"),
                Column::number("Stays"),
                Column::number("Threshold"),
                Column::number("AUC"),
            ],
            rows: vec![vec![
                self.region.to_string(),
                self.stays.to_string(),
                format_number(self.threshold.threshold),
                format_number(self.threshold.auc_score),
            ]],
        };
        let field = self.stratify;
        let residual_rows = self
            .residuals
            .iter()
            .map(|row| {
                let mut cells = key_cells(&row.group);
                cells.push(row.stays.to_string());
                cells.push(format_number(row.median_hospital_los_residual));
                cells.push(format_number(row.median_icu_los_residual));
                cells
            })
            .collect();
        let mut residual_columns = key_columns(&[field]);
        residual_columns.extend([
            Column::number("Stays"),
            Column::number("Median hospital LOS residual"),
            Column::number("Median ICU LOS residual"),
        ]);
        vec![
            threshold,
            metrics_section(
                "Metrics by hour of admission".to_string(),
                GroupField::AdmitHour,
                &self.hourly_metrics,
            ),
            metrics_section(
                format!("Metrics by {field}"),
                field,
                &self.stratified_metrics,
            ),
            Section {
                title: format!("LOS residuals by {field}"),
                columns: residual_columns,
                rows: residual_rows,
            },
        ]
    }
}

impl Sections for LengthOfStayPage {
    fn sections(&self) -> Vec<Section> {
        vec![
            length_of_stay_section(
                "Mean length of stay by region".to_string(),
                GroupField::Region,
                &self.by_region,
                false,
            ),
            length_of_stay_section(
                format!("Mean length of stay by hospital in {}", self.region),
                GroupField::HospitalId,
                &self.by_hospital,
                true,
            ),
            length_of_stay_section(
                format!("Mean length of stay by ethnicity in {}", self.region),
                GroupField::Ethnicity,
                &self.by_ethnicity,
                false,
            ),
        ]
    }
}

impl Sections for DemographicsPage {
    fn sections(&self) -> Vec<Section> {
        let demographic = self.demographic;
        vec![
            composition_section(
                format!("{demographic} and diagnosis by region"),
                &[
                    GroupField::Region,
                    demographic,
                    GroupField::PrimaryDiagnosis,
                ],
                &self.overview,
            ),
            composition_section(
                format!("{demographic} by hospital in {}", self.region),
                &[GroupField::HospitalId, demographic],
                &self.hospital_mix,
            ),
            composition_section(
                format!("Diagnoses by hospital in {}", self.region),
                &[GroupField::HospitalId, GroupField::PrimaryDiagnosis],
                &self.hospital_diagnoses,
            ),
            distribution_section(
                format!("{} by hospital in {}", self.measure, self.region),
                GroupField::HospitalId,
                &self.distributions,
            ),
        ]
    }
}

impl Sections for Report {
    fn sections(&self) -> Vec<Section> {
        let mut sections = self.performance.sections();
        sections.extend(self.length_of_stay.sections());
        sections.extend(self.demographics.sections());
        sections
    }
}
