use anyhow::Result;

use sha2stream_tooling::SETTINGS;

fn main() -> Result<()> {
    fil_logger::init();

    println!("{:#?}", *SETTINGS);
    Ok(())
}
