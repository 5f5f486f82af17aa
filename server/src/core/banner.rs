//! Startup banner

use super::config::is_all_interfaces;
use super::constants::APP_NAME;

const LABEL_WIDTH: usize = 10;

/// Print the listening URLs and data location
pub fn print_banner(host: &str, port: u16, data_dir: &str, database: &str) {
    let base = base_url(host, port);

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();
    print_line("Players:", &link(&format!("{}/rest/players", base)));
    print_line("API docs:", &link(&format!("{}/api/docs", base)));

    if is_all_interfaces(host)
        && let Ok(interfaces) = local_ip_address::list_afinet_netifas()
    {
        for (_, ip) in interfaces
            .iter()
            .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
        {
            print_line("Network:", &link(&format!("http://{}:{}", ip, port)));
        }
    } else if host == "127.0.0.1" || host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<LABEL_WIDTH$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }

    println!("  \x1b[90m➜  {:<LABEL_WIDTH$} {}\x1b[0m", "Data:", data_dir);
    println!("  \x1b[90m➜  {:<LABEL_WIDTH$} {}\x1b[0m", "Database:", database);
    println!();
}

fn print_line(label: &str, value: &str) {
    println!("  \x1b[32m➜\x1b[0m  \x1b[1m{:<LABEL_WIDTH$}\x1b[0m {}", label, value);
}

/// Loopback name for display when bound to every interface
fn base_url(host: &str, port: u16) -> String {
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };
    format!("http://{}:{}", display_host, port)
}

/// OSC 8 hyperlink where the terminal supports it, plain cyan text otherwise
fn link(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        format!("\x1b]8;;{url}\x07\x1b[36m{url}\x1b[0m\x1b]8;;\x07")
    } else {
        format!("\x1b[36m{}\x1b[0m", url)
    }
}
