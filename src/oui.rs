//! OUI vendor lookup against a table compiled ahead of time by `build.rs`
//! from `data/manuf.txt`; no file I/O happens at runtime.

include!(concat!(env!("OUT_DIR"), "/oui_table.rs"));

/// Look up `(short, long)` vendor names for a 48-bit BSSID. Tries
/// successively wider wildcards (48, 44, 40, ..., 24-bit prefixes),
/// first hit wins; returns `("", "")` on a total miss.
pub fn lookup(bssid: [u8; 6]) -> (&'static str, &'static str) {
    let addr = u64::from_be_bytes([0, 0, bssid[0], bssid[1], bssid[2], bssid[3], bssid[4], bssid[5]]);
    for prefix_bits in (24..=48).rev().step_by(4) {
        let wildcard = 48 - prefix_bits;
        let masked = addr & (!0u64 << wildcard);
        let key = format!("{wildcard}.{masked}");
        if let Some(&entry) = OUI_TABLE.get(key.as_str()) {
            return entry;
        }
    }
    ("", "")
}
