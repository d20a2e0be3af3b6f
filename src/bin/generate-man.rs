// Writes gcboard.1 into the given directory (default: current directory)

use clap::CommandFactory;
use gcboard::cli::Cli;
use std::path::PathBuf;

fn main() -> std::io::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer)?;

    let path = out_dir.join("gcboard.1");
    std::fs::write(&path, buffer)?;
    println!("Wrote {}", path.display());
    Ok(())
}
