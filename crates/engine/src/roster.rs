use chrono::NaiveDate;

use crate::error::EngineError;
use crate::model::{Gender, PersonRecord};

/// Column mapping for household roster CSVs. `id` and `name` are required
/// columns; the rest are looked up when present and skipped when the CSV
/// has no such column.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RosterColumns {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_age")]
    pub age: String,
    #[serde(default = "default_date_of_birth")]
    pub date_of_birth: String,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default = "default_contact")]
    pub contact: String,
    #[serde(default = "default_address")]
    pub address: String,
}

fn default_id() -> String {
    "id".into()
}

fn default_name() -> String {
    "name".into()
}

fn default_age() -> String {
    "age".into()
}

fn default_date_of_birth() -> String {
    "date_of_birth".into()
}

fn default_gender() -> String {
    "gender".into()
}

fn default_contact() -> String {
    "contact".into()
}

fn default_address() -> String {
    "address".into()
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            id: default_id(),
            name: default_name(),
            age: default_age(),
            date_of_birth: default_date_of_birth(),
            gender: default_gender(),
            contact: default_contact(),
            address: default_address(),
        }
    }
}

/// Load roster CSV data into PersonRecords, applying the column mapping.
///
/// Blank optional fields become `None`; malformed age or date values are
/// typed errors naming the record. Gender parsing degrades to `Unknown`
/// rather than erroring.
pub fn load_roster(csv_data: &str, columns: &RosterColumns) -> Result<Vec<PersonRecord>, EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EngineError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, EngineError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| EngineError::MissingColumn { column: name.into() })
    };
    let opt_idx = |name: &str| headers.iter().position(|h| h == name);

    let id_idx = idx(&columns.id)?;
    let name_idx = idx(&columns.name)?;
    let age_idx = opt_idx(&columns.age);
    let dob_idx = opt_idx(&columns.date_of_birth);
    let gender_idx = opt_idx(&columns.gender);
    let contact_idx = opt_idx(&columns.contact);
    let address_idx = opt_idx(&columns.address);

    let mut persons = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| EngineError::Io(e.to_string()))?;

        let id = record.get(id_idx).unwrap_or("").trim().to_string();
        let name = record.get(name_idx).unwrap_or("").trim().to_string();

        let age = match nonblank(&record, age_idx) {
            Some(value) => Some(value.parse::<u32>().map_err(|_| EngineError::AgeParse {
                record_id: id.clone(),
                value: value.to_string(),
            })?),
            None => None,
        };

        let date_of_birth = match nonblank(&record, dob_idx) {
            Some(value) => Some(
                NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                    EngineError::DateParse { record_id: id.clone(), value: value.to_string() }
                })?,
            ),
            None => None,
        };

        let gender = nonblank(&record, gender_idx).map(parse_gender).unwrap_or(Gender::Unknown);

        persons.push(PersonRecord {
            id,
            name,
            age,
            date_of_birth,
            gender,
            contact: nonblank(&record, contact_idx).map(str::to_string),
            address: nonblank(&record, address_idx).map(str::to_string),
        });
    }

    Ok(persons)
}

fn nonblank<'a>(record: &'a csv::StringRecord, index: Option<usize>) -> Option<&'a str> {
    let value = record.get(index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_gender(value: &str) -> Gender {
    match value.to_ascii_lowercase().as_str() {
        "m" | "male" => Gender::Male,
        "f" | "female" => Gender::Female,
        _ => Gender::Unknown,
    }
}
