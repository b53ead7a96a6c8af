//! Prints the fields of a GUID.
//!
//! Usage: `inspect_guid [HEX]` where HEX is 32 hex digits of the raw 16-byte
//! wire layout. Without an argument a random GUID is generated. Set
//! `RUST_LOG=debug` to see decode rejections.

use fixed_codec::{Guid, decode_guid, encode_guid};
use log::info;

fn parse_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}

fn main() {
    env_logger::init();

    let bytes = match std::env::args().nth(1) {
        Some(arg) => match parse_hex(&arg) {
            Some(bytes) => bytes,
            None => {
                eprintln!("not a hex string: {}", arg);
                std::process::exit(2);
            }
        },
        None => {
            info!("no input given, generating a random GUID");
            encode_guid(&Guid::new_random()).to_vec()
        }
    };

    let guid = match decode_guid(&bytes) {
        Ok(guid) => guid,
        Err(e) => {
            eprintln!("decode failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== GUID ===");
    println!("Text:  {}", guid);
    println!("data1: {:#010x}", guid.data1());
    println!("data2: {:#06x}", guid.data2());
    println!("data3: {:#06x}", guid.data3());
    print!("data4:");
    for b in guid.data4() {
        print!(" {:02x}", b);
    }
    println!();
    println!("UUID:  {}", uuid::Uuid::from(guid));
}
