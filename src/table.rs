//! Static HTML table of featured articles
//!
//! The table is bound once to a fixed record list and rendered to markup.
//! It has no dependency on the E-utilities service.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A row of the article table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// PubMed Central identifier, without the `PMC` prefix
    pub pmcid: String,
    pub title: String,
}

impl ArticleRecord {
    pub fn new(pmcid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            pmcid: pmcid.into(),
            title: title.into(),
        }
    }
}

const FEATURED: &[(&str, &str)] = &[
    (
        "5818267",
        "Assessment of the Electronic Retinal Implant Alpha AMS in Restoring Vision to Blind Patients with End-Stage Retinitis Pigmentosa",
    ),
    (
        "5809435",
        "The Quiet Eye and Motor Expertise: Explaining the \u{201c}Efficiency Paradox\u{201d}",
    ),
    ("5818376", "Athletes with channelopathy may be eligible to play"),
    (
        "5808129",
        "Sensorimotor Learning during a Marksmanship Task in Immersive Virtual Reality",
    ),
    (
        "5732148",
        "Clinical and Phenomenological Characteristics of Patients with Task-Specific Lingual Dystonia: Possible Association with Occupation",
    ),
    (
        "5723202",
        "Historical Contribution of Pharmaceutics to Botany and Pharmacognosy Development",
    ),
    ("5724252", "Equilibration of energy in slow\u{2013}fast systems"),
    (
        "5765410",
        "Origin and dynamics of oligodendrocytes in the developing brain: Implications for perinatal white matter injury",
    ),
    (
        "5807461",
        "Examining the response programming function of the Quiet Eye: Do tougher shots need a quieter eye?",
    ),
    (
        "5661706",
        "Frequency of Electrocardiographic Changes in Trained Athletes in the Republic of Macedonia",
    ),
    (
        "5696828",
        "Embracing oligodendrocyte diversity in the context of perinatal injury",
    ),
    ("5624293", "The World (of Warcraft) through the eyes of an expert"),
    (
        "5724703",
        "Combined fetal inflammation and postnatal hypoxia causes myelin deficits and autism\u{2010}like behavior in a rat model of diffuse white matter injury",
    ),
    (
        "5554240",
        "Conductance fluctuations in InAs quantum wells possibly driven by Zitterbewegung",
    ),
    ("5496632", "Andrea Ventura: Decrypting noncoding RNAs"),
    (
        "5550539",
        "Exploring the quiet eye in archery using field- and laboratory-based tasks",
    ),
    (
        "5476736",
        "Spacing Repetitions Over Long Timescales: A Review and a Reconsolidation Explanation",
    ),
    ("5472770", "A two-dimensional Dirac fermion microscope"),
];

/// The fixed list of featured articles shown on the landing page
pub fn featured_articles() -> Vec<ArticleRecord> {
    FEATURED
        .iter()
        .map(|(pmcid, title)| ArticleRecord::new(*pmcid, *title))
        .collect()
}

/// Columns of the article table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Pmcid,
    Title,
}

impl Column {
    pub const ALL: [Column; 2] = [Column::Pmcid, Column::Title];

    /// Name of the record field shown in this column
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Pmcid => "pmcid",
            Column::Title => "title",
        }
    }

    fn value<'a>(&self, record: &'a ArticleRecord) -> &'a str {
        match self {
            Column::Pmcid => &record.pmcid,
            Column::Title => &record.title,
        }
    }

    fn compare(&self, a: &ArticleRecord, b: &ArticleRecord) -> Ordering {
        match self {
            // Numeric identifiers sort by value, anything else falls back to text order
            Column::Pmcid => match (a.pmcid.parse::<u64>(), b.pmcid.parse::<u64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => a.pmcid.cmp(&b.pmcid),
            },
            Column::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A two-column table bound to a static list of records
#[derive(Debug, Clone)]
pub struct TableView {
    table_id: String,
    records: Vec<ArticleRecord>,
    zero_records_message: String,
}

impl TableView {
    /// Bind `records` to a table with the default id and empty-table message
    pub fn new(records: Vec<ArticleRecord>) -> Self {
        Self {
            table_id: "table1".to_string(),
            records,
            zero_records_message: "No records found".to_string(),
        }
    }

    /// Table bound to [`featured_articles`]
    pub fn featured() -> Self {
        Self::new(featured_articles())
    }

    pub fn with_table_id(mut self, table_id: impl Into<String>) -> Self {
        self.table_id = table_id.into();
        self
    }

    pub fn with_zero_records_message(mut self, message: impl Into<String>) -> Self {
        self.zero_records_message = message.into();
        self
    }

    /// Reorder the rows by `column`; equal rows keep their relative order
    pub fn sorted_by(mut self, column: Column, direction: SortDirection) -> Self {
        self.records.sort_by(|a, b| {
            let ordering = column.compare(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        self
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the table as HTML
    pub fn render(&self) -> String {
        let mut html = String::new();
        // fmt::Write for String is infallible
        if self.write_table(&mut html).is_err() {
            html.clear();
        }
        html
    }

    fn write_table(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(
            out,
            "<table id=\"{}\" class=\"datatable\">",
            html_escape::encode_double_quoted_attribute(&self.table_id)
        )?;
        out.write_str("  <thead>\n    <tr>\n")?;
        for column in Column::ALL {
            writeln!(out, "      <th>{}</th>", column.as_str())?;
        }
        out.write_str("    </tr>\n  </thead>\n  <tbody>\n")?;

        if self.records.is_empty() {
            writeln!(
                out,
                "    <tr><td colspan=\"{}\" class=\"dataTables_empty\">{}</td></tr>",
                Column::ALL.len(),
                html_escape::encode_text(&self.zero_records_message)
            )?;
        }

        for record in &self.records {
            out.write_str("    <tr>\n")?;
            for column in Column::ALL {
                writeln!(
                    out,
                    "      <td>{}</td>",
                    html_escape::encode_text(column.value(record))
                )?;
            }
            out.write_str("    </tr>\n")?;
        }

        out.write_str("  </tbody>\n</table>\n")
    }
}
