//! Interactive menu loop.
//!
//! Reads one choice per line and dispatches to the session. Input and output
//! are generic so the loop can be driven from tests.

use crate::session::Session;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::error;

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Capture,
    CrcCheck,
    ParityCheck,
    Report,
    Exit,
    Transmit,
    Statistics,
}

impl MenuChoice {
    /// Parse a line of user input. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u32>().ok()? {
            1 => Some(Self::Capture),
            2 => Some(Self::CrcCheck),
            3 => Some(Self::ParityCheck),
            4 => Some(Self::Report),
            5 => Some(Self::Exit),
            6 => Some(Self::Transmit),
            7 => Some(Self::Statistics),
            _ => None,
        }
    }
}

const NO_PACKET: &str = "No packet captured yet.";

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\nMenu:")?;
    writeln!(out, "1. Capture Packet")?;
    writeln!(out, "2. Perform CRC Check")?;
    writeln!(out, "3. Perform Parity Check")?;
    writeln!(out, "4. Generate Report")?;
    writeln!(out, "5. Exit")?;
    writeln!(out, "6. Transmit Over Noisy Channel")?;
    writeln!(out, "7. Show Statistics")?;
    write!(out, "Enter your choice: ")?;
    out.flush()?;
    Ok(())
}

/// Run the menu until the operator exits or input ends.
pub fn run<R: BufRead, W: Write>(session: &mut Session, mut input: R, mut out: W) -> Result<()> {
    let mut line = String::new();

    loop {
        print_menu(&mut out)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let Some(choice) = MenuChoice::parse(&line) else {
            writeln!(out, "Invalid choice: {:?}", line.trim())?;
            continue;
        };

        if choice == MenuChoice::Exit {
            break;
        }
        dispatch(session, choice, &mut out)?;
    }

    Ok(())
}

fn dispatch<W: Write>(session: &mut Session, choice: MenuChoice, out: &mut W) -> Result<()> {
    match choice {
        MenuChoice::Capture => {
            let packet = session.capture()?;
            writeln!(out, "Packet captured ({} bytes).", packet.len())?;
        }
        MenuChoice::CrcCheck => {
            if let Some(packet) = session.current() {
                writeln!(out, "Data for CRC Check:")?;
                write_dump(out, packet)?;
            }
            match session.crc_check() {
                Ok(Some(true)) => writeln!(out, "Packet passed CRC check.")?,
                Ok(Some(false)) => writeln!(out, "Packet failed CRC check.")?,
                Ok(None) => writeln!(out, "{}", NO_PACKET)?,
                Err(err) => {
                    error!(%err, "crc check failed");
                    writeln!(out, "CRC check could not run: {:#}", err)?;
                }
            }
        }
        MenuChoice::ParityCheck => {
            if let Some(packet) = session.current() {
                writeln!(out, "Data before Parity Check:")?;
                write_dump(out, packet)?;
            }
            match session.parity_check() {
                Some(true) => writeln!(out, "Packet passed parity check.")?,
                Some(false) => writeln!(out, "Packet failed parity check.")?,
                None => writeln!(out, "{}", NO_PACKET)?,
            }
        }
        MenuChoice::Report => match session.write_report() {
            Ok(Some(path)) => {
                writeln!(out, "Report generated and saved to {}", path.display())?
            }
            Ok(None) => writeln!(out, "{}", NO_PACKET)?,
            Err(err) => {
                error!(%err, "report failed");
                writeln!(out, "{:#}", err)?;
            }
        },
        MenuChoice::Transmit => match session.transmit()? {
            Some(outcome) => {
                writeln!(out, "Bits flipped in transit: {}", outcome.bits_flipped)?;
                writeln!(out, "CRC at receiver: {}", verdict(outcome.crc_passed))?;
                writeln!(out, "Parity at receiver: {}", verdict(outcome.parity_passed))?;
                if outcome.is_undetected() {
                    writeln!(out, "Corruption went undetected.")?;
                } else if outcome.is_corrupted() {
                    writeln!(out, "Corruption detected.")?;
                }
            }
            None => writeln!(out, "{}", NO_PACKET)?,
        },
        MenuChoice::Statistics => {
            write!(out, "{}", session.metrics().export_text())?;
            writeln!(
                out,
                "observed_bit_error_rate={:.4}",
                session.channel_stats().observed_error_rate()
            )?;
        }
        MenuChoice::Exit => {}
    }
    Ok(())
}

fn write_dump<W: Write>(out: &mut W, packet: &linkcheck_sim_core::Packet) -> Result<()> {
    writeln!(out, "Decimal: {}", packet.decimal_dump())?;
    writeln!(out, "Binary: {}", packet.binary_dump())?;
    Ok(())
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "pass"
    } else {
        "fail"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use linkcheck_sim_core::channel::ChannelConfig;
    use std::io::Cursor;
    use std::path::Path;

    fn session(dir: &Path) -> Session {
        Session::new(Config {
            divisor: "1101".parse().unwrap(),
            seed: 9,
            report_path: dir.join("network_report.txt"),
            channel: ChannelConfig::perfect(10),
            print_config: false,
            print_metrics: false,
        })
        .unwrap()
    }

    fn drive(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        run(session, Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1\n"), Some(MenuChoice::Capture));
        assert_eq!(MenuChoice::parse("  5 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Statistics));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("abc"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_checks_without_capture() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path());
        let output = drive(&mut session, "2\n3\n4\n6\n5\n");

        assert_eq!(output.matches(NO_PACKET).count(), 4);
    }

    #[test]
    fn test_capture_then_checks() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path());
        let output = drive(&mut session, "1\n2\n3\n4\n5\n");

        assert!(output.contains("Packet captured"));
        assert!(output.contains("Data for CRC Check:"));
        assert!(output.contains("Data before Parity Check:"));
        assert!(output.contains("CRC check."));
        assert!(output.contains("parity check."));
        assert!(output.contains("Report generated and saved to"));
        assert!(dir.path().join("network_report.txt").exists());
    }

    #[test]
    fn test_invalid_input_continues() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path());
        let output = drive(&mut session, "abc\n1\n5\n");

        assert!(output.contains("Invalid choice: \"abc\""));
        assert!(output.contains("Packet captured"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path());
        let output = drive(&mut session, "1\n");

        assert!(output.contains("Packet captured"));
        assert_eq!(session.metrics().packets_captured, 1);
    }

    #[test]
    fn test_transmit_and_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(dir.path());
        let output = drive(&mut session, "1\n6\n7\n5\n");

        assert!(output.contains("Bits flipped in transit: 0"));
        assert!(output.contains("CRC at receiver: pass"));
        assert!(output.contains("transmissions=1"));
        assert!(output.contains("observed_bit_error_rate=0.0000"));
    }
}
