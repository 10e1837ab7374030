//! macOS radio control, grounded on the original `net_darwin.go`: shells
//! out to the private `airport` helper for current-association read and
//! disassociation, and to `system_profiler` for supported-channel
//! enumeration, rather than binding CoreWLAN over an Objective-C FFI.

use std::process::Command;

use crate::err::RadioError;

use super::{AssociatedNetwork, RadioControl};

const AIRPORT_PATH: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

pub struct MacOsRadioControl;

impl MacOsRadioControl {
    pub fn new() -> Self {
        MacOsRadioControl
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<String, RadioError> {
        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(if stderr.to_lowercase().contains("permission") {
                RadioError::Permission(stderr)
            } else {
                RadioError::Protocol(stderr)
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for MacOsRadioControl {
    fn default() -> Self {
        MacOsRadioControl::new()
    }
}

impl RadioControl for MacOsRadioControl {
    fn default_wifi_interface(&self) -> Result<String, RadioError> {
        let output = self.run("networksetup", &["-listallhardwareports"])?;
        parse_wifi_hardware_port(&output).ok_or_else(|| {
            RadioError::Protocol("no Wi-Fi hardware port found in networksetup output".into())
        })
    }

    fn associated_network(&self, _iface: &str) -> Result<AssociatedNetwork, RadioError> {
        match self.run(AIRPORT_PATH, &["-I"]) {
            Ok(output) => Ok(parse_airport_info(&output)),
            // Location permission denied degrades to "no highlight of the
            // current AP," not a hard failure (spec §7 policy).
            Err(RadioError::Permission(_)) => Ok(AssociatedNetwork::default()),
            Err(err) => Err(err),
        }
    }

    fn supported_channels(&self, _iface: &str) -> Result<Vec<u32>, RadioError> {
        let output = self.run("system_profiler", &["SPAirPortDataType", "-json"])?;
        let channels = parse_supported_channels(&output);
        if channels.is_empty() {
            return Err(RadioError::Protocol(
                "system_profiler reported no supported channels".into(),
            ));
        }
        Ok(channels)
    }

    fn disassociate(&self, _iface: &str) -> Result<(), RadioError> {
        self.run(AIRPORT_PATH, &["-z"]).map(|_| ())
    }

    fn set_channel(&self, _iface: &str, channel: u32) -> Result<(), RadioError> {
        self.run(AIRPORT_PATH, &[&format!("-c{channel}")]).map(|_| ())
    }
}

fn parse_wifi_hardware_port(listing: &str) -> Option<String> {
    let mut lines = listing.lines().peekable();
    while let Some(line) = lines.next() {
        if line.trim() == "Hardware Port: Wi-Fi" {
            if let Some(device_line) = lines.peek() {
                if let Some(device) = device_line.strip_prefix("Device: ") {
                    return Some(device.trim().to_string());
                }
            }
        }
    }
    None
}

fn parse_airport_info(info: &str) -> AssociatedNetwork {
    let mut result = AssociatedNetwork::default();
    for line in info.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        match key {
            "BSSID" => result.bssid = parse_mac(value),
            "SSID" => result.ssid = Some(value.to_string()),
            "channel" => result.channel = value.split(',').next().and_then(|c| c.trim().parse().ok()),
            _ => {}
        }
    }
    result
}

fn parse_mac(value: &str) -> Option<[u8; 6]> {
    let mut out = [0u8; 6];
    let mut parts = value.split(':');
    for slot in out.iter_mut() {
        *slot = u8::from_str_radix(parts.next()?, 16).ok()?;
    }
    Some(out)
}

/// Extract the union of every `spairport_supported_channels` array nested
/// under `spairport_airport_interfaces` in the JSON emitted by
/// `system_profiler SPAirPortDataType -json`, without pulling in a JSON
/// parser for a handful of scalar-array fields: scan for the key and read
/// the quoted, band-annotated strings inside its bracketed list (e.g.
/// `"6 (2GHz)"`, `"36 (5GHz)"`).
fn parse_supported_channels(json: &str) -> Vec<u32> {
    let mut channels = std::collections::BTreeSet::new();
    let marker = "\"spairport_supported_channels\"";
    let mut rest = json;
    while let Some(idx) = rest.find(marker) {
        rest = &rest[idx + marker.len()..];
        let Some(open) = rest.find('[') else { break };
        let Some(close) = rest[open..].find(']') else { break };
        let body = &rest[open + 1..open + close];
        for entry in body.split(',') {
            let entry = entry.trim().trim_matches('"');
            if let Some(channel) = parse_channel_entry(entry) {
                channels.insert(channel);
            }
        }
        rest = &rest[open + close..];
    }
    channels.into_iter().collect()
}

/// Parse one `spairport_supported_channels` entry shaped like `"6 (2GHz)"`
/// into its leading channel number, mirroring `net_darwin.go`'s
/// `^(\d{1,3})\s\([2,5]GHz\)$` regex.
fn parse_channel_entry(entry: &str) -> Option<u32> {
    let digits: String = entry.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let tail = entry[digits.len()..].trim_start();
    if tail != "(2GHz)" && tail != "(5GHz)" {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wifi_device_from_hardware_port_listing() {
        let listing = "Hardware Port: Ethernet\nDevice: en0\nEthernet Address: 00:00:00:00:00:00\n\n\
                        Hardware Port: Wi-Fi\nDevice: en1\nEthernet Address: 00:00:00:00:00:00\n";
        assert_eq!(parse_wifi_hardware_port(listing), Some("en1".to_string()));
    }

    #[test]
    fn parses_airport_dash_i_output() {
        let info = "     agrCtlRSSI: -55\n     BSSID: c4:3d:c7:11:22:33\n     SSID: Home\n     channel: 6\n";
        let parsed = parse_airport_info(info);
        assert_eq!(parsed.bssid, Some([0xC4, 0x3D, 0xC7, 0x11, 0x22, 0x33]));
        assert_eq!(parsed.ssid.as_deref(), Some("Home"));
        assert_eq!(parsed.channel, Some(6));
    }

    #[test]
    fn extracts_channels_from_spairport_supported_channels_strings() {
        let json = r#"{"SPAirPortDataType":[{"spairport_airport_interfaces":[{"_name":"en0","spairport_supported_channels":["1 (2GHz)","6 (2GHz)","11 (2GHz)","36 (5GHz)"]}]}]}"#;
        assert_eq!(parse_supported_channels(json), vec![1, 6, 11, 36]);
    }

    #[test]
    fn ignores_entries_that_do_not_match_the_band_suffix() {
        assert_eq!(parse_channel_entry("6 (2GHz)"), Some(6));
        assert_eq!(parse_channel_entry("garbage"), None);
    }
}
