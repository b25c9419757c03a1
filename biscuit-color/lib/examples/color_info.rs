//! Example: Display detected color support and sample tags
//!
//! Run with: cargo run -p biscuit-color --example color_info

use biscuit_color::discovery::detection::detect;
use biscuit_color::terminal::Terminal;
use biscuit_color::terminal::support::last_err;
use biscuit_color::utils::print::println;
use biscuit_color::utils::tags::tag_names;

fn main() -> std::io::Result<()> {
    let term = Terminal::new();
    let detection = detect();

    println!("=== Color Support ===\n");
    println!("Platform:    {}", term.platform);
    println!("Level:       {}", term.color_level);
    println!("Source:      {}", detection.source);
    println!("NO_COLOR:    {}", if term.no_color { "yes" } else { "no" });
    println!("TTY:         {}", if term.is_tty { "yes" } else { "no" });
    println!("256 colors:  {}", if term.supports_256_color { "yes" } else { "no" });
    println!("True color:  {}", if term.supports_true_color { "yes" } else { "no" });
    if let Some(err) = last_err() {
        println!("Warning:     {err}");
    }

    println!("\n=== Tags ===\n");
    for name in tag_names() {
        println(format!("<{name}>{name:<16}</> {name}"))?;
    }

    Ok(())
}
