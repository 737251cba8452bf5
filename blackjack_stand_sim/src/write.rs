use crate::stats::SimulationSummary;
use serde::Serialize;
use std::io::{self, Write};

/// The formats a summary can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The JSON form of a summary, the derived rates are included so consumers do not recompute them.
#[derive(Serialize)]
struct SummaryJson<'a> {
    #[serde(flatten)]
    summary: &'a SimulationSummary,
    net_change: f64,
    win_percentage: f64,
    average_time_per_round: f64,
}

/// A public function to take a `SimulationSummary` and write it to `writer` in the chosen format.
pub fn write_summary(
    summary: &SimulationSummary,
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writer.write_all(summary.to_string().as_bytes())?,
        OutputFormat::Json => {
            let json = SummaryJson {
                summary,
                net_change: summary.net_change(),
                win_percentage: summary.win_percentage(),
                average_time_per_round: summary.average_time_per_round(),
            };
            serde_json::to_writer_pretty(&mut writer, &json)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> SimulationSummary {
        SimulationSummary {
            rounds_played: 4,
            wins: 1,
            losses: 2,
            ties: 1,
            total_wagered: 40.0,
            starting_balance: 100.0,
            final_balance: 90.0,
            elapsed_secs: 0.5,
            ended_early: false,
        }
    }

    #[test]
    fn writes_text_table() {
        let mut out = Vec::new();
        write_summary(&summary(), OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("simulation results"));
        assert!(text.contains("25.00"));
    }

    #[test]
    fn writes_json_with_derived_fields() {
        let mut out = Vec::new();
        write_summary(&summary(), OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rounds_played"], 4);
        assert_eq!(value["wins"], 1);
        assert_eq!(value["net_change"], -10.0);
        assert_eq!(value["win_percentage"], 25.0);
        assert_eq!(value["average_time_per_round"], 0.125);
        assert_eq!(value["ended_early"], false);
    }
}
