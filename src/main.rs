use gcboard::cli::{internal_error, is_user_error, run};

fn main() {
    // Older Windows consoles need virtual terminal processing switched on for colors
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        if is_user_error(&e) {
            // Sheet missing, unreadable or empty: something the user can fix or retry
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }

        // Show error chain if available
        let mut source = e.source();
        if source.is_some() {
            eprintln!("Caused by:");
            let mut indent = 1;
            while let Some(err) = source {
                eprintln!("{:indent$}  {}", "", err);
                source = err.source();
                indent += 1;
            }
        }
        internal_error(&e.to_string());
    }
}
