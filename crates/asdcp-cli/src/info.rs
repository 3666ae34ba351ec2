//! `asdcp info`: dump writer identification and layout facts.

use std::path::PathBuf;

use anyhow::Result;
use asdcp_mxf::info::LabelSet;
use asdcp_mxf::{essence_type, EssenceType, TrackFileReader};
use serde_json::json;

use crate::CliError;

pub fn run(args: &[String]) -> Result<()> {
    let mut json_output = false;
    let mut input = None;

    for arg in args {
        match arg.as_str() {
            "--json" => json_output = true,
            flag if flag.starts_with('-') => {
                return Err(CliError::BadOptions(format!("unknown option {flag}")).into());
            }
            path => input = Some(PathBuf::from(path)),
        }
    }
    let Some(input) = input else {
        return Err(CliError::BadOptions("info needs <input.mxf>".into()).into());
    };

    let essence = essence_type(&input)?;
    if essence == EssenceType::Unknown {
        return Err(CliError::Unsupported(input.display().to_string()).into());
    }

    let reader = TrackFileReader::open_read(&input)?;
    let info = &reader.info;
    let label_set = match info.label_set {
        LabelSet::Smpte => "SMPTE",
        LabelSet::Interop => "MXF Interop",
    };

    if json_output {
        let value = json!({
            "file": input.display().to_string(),
            "essence_type": format!("{essence:?}"),
            "frames": reader.frames(),
            "label_set": label_set,
            "company_name": info.company_name,
            "product_name": info.product_name,
            "product_version": info.product_version,
            "product_uuid": info.product_uuid.to_string(),
            "asset_uuid": info.asset_uuid.to_string(),
            "encrypted_essence": info.encrypted_essence,
            "uses_hmac": info.uses_hmac,
            "context_id": info.context_id.to_string(),
            "cryptographic_key_id": info.cryptographic_key_id.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", input.display());
    println!("       EssenceType: {essence:?}");
    println!("          Duration: {} frames", reader.frames());
    println!("    Label Set Type: {label_set}");
    println!("       CompanyName: {}", info.company_name);
    println!("       ProductName: {}", info.product_name);
    println!("    ProductVersion: {}", info.product_version);
    println!("       ProductUUID: {}", info.product_uuid);
    println!("         AssetUUID: {}", info.asset_uuid);
    println!("  EncryptedEssence: {}", if info.encrypted_essence { "Yes" } else { "No" });
    if info.encrypted_essence {
        println!("              HMAC: {}", if info.uses_hmac { "Yes" } else { "No" });
        println!("         ContextID: {}", info.context_id);
        println!("CryptographicKeyID: {}", info.cryptographic_key_id);
    }
    Ok(())
}
