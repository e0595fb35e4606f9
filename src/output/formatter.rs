use colored::Colorize;

use crate::index::models::IndexMetadata;
use crate::palette::controller::GroupedResults;

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg.green());
}

/// Print an error message.
pub fn print_error(msg: &str) {
    println!("{} {}", "✗".red().bold(), msg.red());
}

/// Render grouped palette results.
pub fn print_results(results: &GroupedResults, query: &str) {
    if results.total() == 0 {
        println!("No matches for \"{}\"", query);
        if results.from_fallback {
            println!();
            println!(
                "{}: The index is empty. Run '{}' to build it.",
                "hint".dimmed(),
                "cosmonav index".cyan()
            );
        }
        return;
    }

    if results.from_fallback {
        println!(
            "{}",
            "(index empty, showing live accounts only)".yellow()
        );
        println!();
    }

    if !results.accounts.is_empty() {
        println!("{}", "Accounts".bold().underline());
        for account in &results.accounts {
            println!(
                "  {} {}",
                account.name.white().bold(),
                format!("- {} / {}", account.resource_group, account.location).dimmed()
            );
        }
        println!();
    }

    if !results.databases.is_empty() {
        println!("{}", "Databases".bold().underline());
        for database in &results.databases {
            println!(
                "  {} {}",
                database.id.white().bold(),
                format!("- {}", database.account_name).dimmed()
            );
        }
        println!();
    }

    if !results.containers.is_empty() {
        println!("{}", "Containers".bold().underline());
        for container in &results.containers {
            println!(
                "  {} {}",
                container.id.white().bold(),
                format!(
                    "- {}/{}",
                    container.account_name, container.database_name
                )
                .dimmed()
            );
            if let Some(pk) = &container.partition_key {
                println!("    {}", pk.dimmed());
            }
        }
        println!();
    }

    if !results.scoped_containers.is_empty() {
        println!("{}", "Containers here".bold().underline());
        for container in &results.scoped_containers {
            println!("  {}", container.id.white().bold());
        }
        println!();
    }
}

/// Render the index status record. Metadata with a zero account count is
/// treated the same as no metadata: the index hasn't been built.
pub fn print_status(metadata: Option<&IndexMetadata>) {
    match metadata {
        Some(meta) if meta.total_accounts > 0 => {
            println!("Index built {}", meta.last_updated.bold());
            println!("  accounts:   {}", meta.total_accounts);
            println!("  databases:  {}", meta.total_databases);
            println!("  containers: {}", meta.total_containers);
        }
        _ => {
            println!(
                "No index built. Run '{}' first.",
                "cosmonav index".cyan()
            );
        }
    }
}
