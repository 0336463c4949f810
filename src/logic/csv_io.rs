//! CSV participant import and standings export.

use crate::logic::standings::StandingsRow;
use crate::models::{CompetitionType, EngineError, Participant, Player};
use std::io::{Read, Write};

/// Errors from CSV import/export.
#[derive(Debug)]
pub enum CsvError {
    Csv(csv::Error),
    /// A row that does not describe a valid participant (1-based line number).
    InvalidRow { line: u64, error: EngineError },
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvError::Csv(e) => write!(f, "CSV error: {}", e),
            CsvError::InvalidRow { line, error } => write!(f, "Line {}: {}", line, error),
        }
    }
}

impl std::error::Error for CsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvError::Csv(e) => Some(e),
            CsvError::InvalidRow { error, .. } => Some(error),
        }
    }
}

impl From<csv::Error> for CsvError {
    fn from(e: csv::Error) -> Self {
        CsvError::Csv(e)
    }
}

/// Read participants, one per row, without a header. Blank rows are skipped.
///
/// - individual: `name`
/// - pair: `name[,partner]`
/// - team: `team,player;player;...`
pub fn import_participants<R: Read>(
    reader: R,
    competition: CompetitionType,
) -> Result<Vec<Participant>, CsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut participants = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let first = record.get(0).unwrap_or("");
        if first.is_empty() {
            if record.iter().all(str::is_empty) {
                continue;
            }
            return Err(CsvError::InvalidRow {
                line,
                error: EngineError::EmptyName,
            });
        }
        let second = record.get(1).filter(|s| !s.is_empty());
        let participant = match competition {
            CompetitionType::Individual => Participant::individual(first),
            CompetitionType::Pair => Participant::pair(first, second.map(str::to_string)),
            CompetitionType::Team => {
                let roster = second
                    .map(|s| {
                        s.split(';')
                            .map(str::trim)
                            .filter(|n| !n.is_empty())
                            .map(Player::new)
                            .collect()
                    })
                    .unwrap_or_default();
                Participant::team(first, roster)
            }
        };
        participants.push(participant);
    }
    log::debug!("Imported {} {} participants", participants.len(), competition);
    Ok(participants)
}

/// Write ranked standings with a header row; rank is the 1-based row position.
pub fn write_standings_csv<W: Write>(rows: &[StandingsRow], writer: W) -> Result<(), CsvError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "rank",
        "name",
        "played",
        "won",
        "lost",
        "units_won",
        "units_lost",
        "points",
    ])?;
    for (i, row) in rows.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            row.name.clone(),
            row.played.to_string(),
            row.won.to_string(),
            row.lost.to_string(),
            row.units_won.to_string(),
            row.units_lost.to_string(),
            row.points.to_string(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
