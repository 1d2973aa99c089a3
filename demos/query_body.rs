/// `ParamList` usage example
use paramlist::{Encoding, ParamList};
use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a request body; insertion order does not matter
    let mut params = ParamList::new();
    params.set("Version", Some("2020-01-01"))?;
    params.set("Action", Some("ListUsers"))?;
    params.set("PathPrefix", Some("/division abc/"))?;
    params.set("DryRun", None)?;
    println!("Body: {params}"); // Action=ListUsers&DryRun&PathPrefix=%2Fdivision%20abc%2F&Version=2020-01-01
    println!();

    // Replace and delete
    params.set("Version", Some("2021-06-30"))?;
    params.delete("DryRun");
    println!("After edits: {params}");
    println!();

    // Stream the body in small chunks
    let mut body = params.to_stream();
    println!("Stream size: {}", body.size());
    while let Some(chunk) = body.read(Some(16)) {
        println!("  chunk: {}", String::from_utf8_lossy(chunk));
    }

    // Rewind and consume through std::io::Read
    body.rewind();
    let mut text = String::new();
    body.read_to_string(&mut text)?;
    println!("Re-read: {text}");
    println!();

    // Form encoding and parsing
    let form = ParamList::parse("q=hello+world&page=2", Encoding::FormUrlencoded)?;
    for param in &form {
        println!("  {} = {:?}", param.name(), param.value());
    }
    Ok(())
}
