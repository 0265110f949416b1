//! Rendering decoded records for the terminal.

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::parse::ParseResult;
use crate::record::{DeviceId, ExtensionDescriptor, Fix, Header, Record};

/// Render a whole-file parse result.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_parse(result: &ParseResult, output: &OutputConfig) -> Result<String> {
    match output.format {
        OutputFormat::Json => to_json(result, output.pretty),
        OutputFormat::Plain => Ok(plain_parse(result, output.precision)),
    }
}

/// Render one record per input line.
///
/// Line numbers refer to the input even when unknown records are hidden.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_records(
    records: &[Record],
    include_unknown: bool,
    output: &OutputConfig,
) -> Result<String> {
    let shown = records
        .iter()
        .enumerate()
        .filter(|(_, record)| include_unknown || !record.is_unknown());

    match output.format {
        OutputFormat::Json => {
            let records: Vec<&Record> = shown.map(|(_, record)| record).collect();
            to_json(&records, output.pretty)
        }
        OutputFormat::Plain => Ok(shown
            .map(|(index, record)| {
                format!("{:>6}  {}", index + 1, plain_record(record, output.precision))
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn plain_parse(result: &ParseResult, precision: usize) -> String {
    let mut lines = Vec::new();

    if let Some(device) = &result.device {
        lines.push(format!("Device:  {}", plain_device(device)));
    }
    match result.date() {
        Some(date) => lines.push(format!("Date:    {date}")),
        None => lines.push("Date:    unknown".to_string()),
    }

    lines.push(format!("Headers: {}", result.headers.len()));
    lines.extend(result.headers.iter().map(|h| format!("  {}", plain_header(h))));

    if !result.fix_extensions.is_empty() {
        lines.push(format!(
            "Fix extensions:  {}",
            plain_extensions(&result.fix_extensions)
        ));
    }
    if !result.data_extensions.is_empty() {
        lines.push(format!(
            "Data extensions: {}",
            plain_extensions(&result.data_extensions)
        ));
    }

    lines.push(format!("Fixes:   {}", result.fixes.len()));
    lines.extend(result.fixes.iter().map(|f| format!("  {}", plain_fix(f, precision))));

    lines.join("\n")
}

fn plain_record(record: &Record, precision: usize) -> String {
    match record {
        Record::DeviceId(device) => format!("A  {}", plain_device(device)),
        Record::Fix(fix) => format!("B  {}", plain_fix(fix, precision)),
        Record::Header(header) => format!("H  {}", plain_header(header)),
        Record::Extension(extension) => format!(
            "{}  {}",
            extension.table.tag(),
            plain_extensions(&extension.descriptors)
        ),
        Record::Unknown { tag } => format!("{}  (unknown)", tag.unwrap_or(' ')),
    }
}

fn plain_device(device: &DeviceId) -> String {
    let mut text = device.manufacturer.clone();
    if let Some(id) = &device.logger_id {
        text.push(' ');
        text.push_str(id);
    }
    if let Some(number) = device.flight_number {
        text.push_str(&format!(" (flight {number})"));
    }
    if let Some(data) = &device.data {
        text.push_str(&format!(" [{data}]"));
    }
    text
}

fn plain_header(header: &Header) -> String {
    format!(
        "{} {} {:<20} {}",
        header.source.as_char(),
        header.subject,
        header.description.as_deref().unwrap_or(""),
        header.value
    )
}

fn plain_fix(fix: &Fix, precision: usize) -> String {
    let when = match fix.timestamp {
        Some(timestamp) => timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        None => format!("{:>20}", fix.time.format("%H:%M:%S").to_string()),
    };
    format!(
        "{when}  {:>width$.precision$} {:>width$.precision$}  {:>6} m {:>6} m  {}",
        fix.latitude,
        fix.longitude,
        fix.gps_altitude,
        fix.pressure_altitude,
        fix.validity,
        width = precision + 5,
    )
}

fn plain_extensions(descriptors: &[ExtensionDescriptor]) -> String {
    if descriptors.is_empty() {
        return "(none)".to_string();
    }
    descriptors
        .iter()
        .map(|d| format!("{} {}-{}", d.code, d.start, d.end))
        .collect::<Vec<_>>()
        .join(", ")
}
