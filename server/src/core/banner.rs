//! Startup banner

use super::config::is_all_interfaces;
use super::constants::APP_NAME;

/// Print the startup banner with URLs and registry summary
pub fn print_banner(
    host: &str,
    port: u16,
    user_header: &str,
    table_count: usize,
    preset_count: usize,
) {
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };

    // Label width, padded for alignment
    const W: usize = 13;

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m \x1b[36mhttp://{}:{}/api/v1/table\x1b[0m",
        "Tables API:", display_host, port
    );
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m \x1b[36mhttp://{}:{}/api/docs\x1b[0m",
        "Docs:", display_host, port
    );

    if is_all_interfaces(host) {
        if let Ok(interfaces) = local_ip_address::list_afinet_netifas() {
            for (_, ip) in interfaces
                .iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
            {
                println!(
                    "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m \x1b[36mhttp://{}:{}\x1b[0m",
                    "Network:", ip, port
                );
            }
        }
    } else if host == "127.0.0.1" || host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }

    println!(
        "  \x1b[90m➜  {:<W$} {}\x1b[0m",
        "User header:", user_header
    );
    println!(
        "  \x1b[90m➜  {:<W$} {} tables, {} filter presets\x1b[0m",
        "Registry:", table_count, preset_count
    );
    println!();
}
