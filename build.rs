use std::{
    env::var,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Reads `data/manuf.txt` (tab-separated `prefix\tshort\tlong` entries, `#`
/// comments, blank lines ignored) and emits a `phf::Map` literal binding
/// vendor key strings to `(short, long)` name tuples, so no file I/O is
/// needed at runtime to resolve an OUI.
fn main() {
    println!("cargo:rerun-if-changed=data/manuf.txt");

    let manuf_path = Path::new("data/manuf.txt");
    let reader = BufReader::new(File::open(manuf_path).expect("data/manuf.txt must exist"));

    let mut builder = phf_codegen::Map::new();
    let mut owned_keys = Vec::new();
    let mut owned_values = Vec::new();

    for line in reader.lines() {
        let line = line.expect("data/manuf.txt must be valid UTF-8");
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t');
        let prefix = fields.next().unwrap_or_default().trim();
        let short = fields.next().unwrap_or_default().trim();
        let long = fields.next().unwrap_or(short).trim();
        if prefix.is_empty() || short.is_empty() {
            continue;
        }
        for key in oui_keys(prefix) {
            owned_keys.push(key);
            owned_values.push(format!("({short:?}, {long:?})"));
        }
    }

    for (key, value) in owned_keys.iter().zip(owned_values.iter()) {
        builder.entry(key.as_str(), value.as_str());
    }

    let out_dir = var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("oui_table.rs");
    let mut out = BufWriter::new(File::create(dest).unwrap());
    writeln!(
        out,
        "static OUI_TABLE: phf::Map<&'static str, (&'static str, &'static str)> = {};",
        builder.build()
    )
    .unwrap();
}

/// Expand a `manuf`-style prefix (`"AA:BB:CC"`, `"AA:BB:CC:DD/28"`, or a bare
/// 48-bit address) into the wildcard-keyed lookup strings used by `oui.rs`:
/// `"<wildcard_bits>.<prefix_as_integer>"` where `wildcard_bits = 48 -
/// prefix_bits`.
fn oui_keys(prefix: &str) -> Vec<String> {
    let (addr_part, bits) = match prefix.split_once('/') {
        Some((addr, bits)) => (addr, bits.parse::<u32>().unwrap_or(24)),
        None => (prefix, (prefix.split(':').count() as u32) * 8),
    };
    let mut value: u64 = 0;
    for byte in addr_part.split(':') {
        if let Ok(b) = u8::from_str_radix(byte, 16) {
            value = (value << 8) | u64::from(b);
        }
    }
    value <<= 48u32.saturating_sub(bits.min(48));
    let wildcard = 48 - bits.min(48);
    vec![format!("{wildcard}.{value}")]
}
