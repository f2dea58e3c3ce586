//! Output formatting for simulation results.

use std::io::{self, Write};

use clap::ValueEnum;
use rlcsim_solver::{Quantity, SimulationResult};

/// Column width of the table format.
const WIDTH: usize = 14;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width columns for reading in a terminal
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON object
    Json,
}

/// Write `result` in the given format.
pub fn write_result<W: Write>(
    out: &mut W,
    result: &SimulationResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => write_table(out, result),
        OutputFormat::Csv => write_csv(out, result),
        OutputFormat::Json => write_json(out, result),
    }
}

fn column_header(quantity: Quantity) -> String {
    format!("{} ({})", quantity.label(), quantity.unit())
}

/// Print the result as an aligned table.
pub fn write_table<W: Write>(out: &mut W, result: &SimulationResult) -> io::Result<()> {
    write!(out, "{:>WIDTH$}", "Time (s)")?;
    for &quantity in result.quantities.keys() {
        write!(out, "{:>WIDTH$}", column_header(quantity))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(WIDTH * (1 + result.quantities.len())))?;

    for (k, t) in result.time.iter().enumerate() {
        write!(out, "{:>WIDTH$.6e}", t)?;
        for values in result.quantities.values() {
            write!(out, "{:>WIDTH$.6e}", values[k])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Print the result as CSV with snake_case column names.
pub fn write_csv<W: Write>(out: &mut W, result: &SimulationResult) -> io::Result<()> {
    let mut header = vec!["time"];
    header.extend(result.quantities.keys().map(Quantity::name));
    writeln!(out, "{}", header.join(","))?;

    for (k, t) in result.time.iter().enumerate() {
        let mut row = vec![t.to_string()];
        row.extend(result.quantities.values().map(|values| values[k].to_string()));
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}

/// Print the result as JSON.
pub fn write_json<W: Write>(out: &mut W, result: &SimulationResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlcsim_core::{Circuit, TimeVector};
    use rlcsim_solver::{SimulationOptions, simulate};

    fn series_r() -> SimulationResult {
        let circuit = Circuit::from_values(Some(100.0), None, None, 10.0, "series").unwrap();
        let times = TimeVector::uniform(1.0, 3).unwrap();
        simulate(&circuit, &times, &SimulationOptions::default()).unwrap()
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_result(&mut buf, &series_r(), format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_csv() {
        let csv = render(OutputFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "time,source_voltage,current,resistor_voltage,inductor_voltage,capacitor_voltage"
        );
        assert_eq!(lines[1], "0,10,0.1,10,0,0");
        assert_eq!(lines[3], "1,10,0.1,10,0,0");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_table_alignment() {
        let table = render(OutputFormat::Table);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].contains("V(src) (V)"), "{}", lines[0]);
        assert!(lines[0].contains("I (A)"), "{}", lines[0]);
        assert_eq!(lines[1].len(), WIDTH * 6);
        for line in &lines[2..] {
            assert_eq!(line.len(), WIDTH * 6, "{:?}", line);
        }
        assert!(lines[4].trim_start().starts_with("1.000000e0"), "{}", lines[4]);
    }

    #[test]
    fn test_json() {
        let json = render(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["topology"], "series");
        assert_eq!(value["time"].as_array().unwrap().len(), 3);
        assert_eq!(value["quantities"]["current"][1], 0.1);
    }
}
