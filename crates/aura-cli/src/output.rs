use aura_types::{HistoryEntry, Role};

pub fn print_entry(entry: &HistoryEntry) {
    match entry.role {
        Role::User => println!("you  > {}", entry.display_text()),
        Role::Bot => println!("aura > {}", entry.display_text()),
        Role::System => println!("sys  ~ {}", entry.display_text()),
        Role::Tool => println!(
            "tool [{}] {}",
            entry.tool_name.as_deref().unwrap_or("?"),
            entry.tool_result.as_deref().unwrap_or("")
        ),
    }
}
