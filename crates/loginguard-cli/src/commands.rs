//! Command dispatch and human-readable formatting for the REPL.
//!
//! Grounded on `cmd/cli/cliMethods.go`'s `processCommand`, generalized
//! so every command (not only the handful the original implemented)
//! shares the same response formatting.

use crate::client::Client;

const HELP_TEXT: &str = "\
commands:
  help                                show this text
  addtowhitelist|awl <ip>/<mask>      add a subnet to the whitelist
  removefromwhitelist|rwl <ip>/<mask> remove a subnet from the whitelist
  isinwhitelist|iwl <ip>/<mask>       check whitelist membership
  allinwhitelist|allwl                dump the whitelist
  addtoblacklist|abl <ip>/<mask>      add a subnet to the blacklist
  removefromblacklist|rbl <ip>/<mask> remove a subnet from the blacklist
  isinblacklist|ibl <ip>/<mask>       check blacklist membership
  allinblacklist|allbl                dump the blacklist
  request|req <login> <password> <ip> evaluate an authentication attempt
  clearbucketbylogin|cbl <login>      reset the login rate-limit counter
  clearbucketbyip|cbip <ip>           reset the ip rate-limit counter
  exit                                quit";

fn parse_cidr_arg(arg: &str) -> Result<(String, i32), String> {
    let (ip, mask) = arg
        .split_once('/')
        .ok_or_else(|| format!("expected <ip>/<mask>, got {arg:?}"))?;
    let mask: i32 =
        mask.parse().map_err(|_| format!("mask must be an integer, got {mask:?}"))?;
    Ok((ip.to_string(), mask))
}

/// Process one raw REPL line and return the text to print, or `None` if
/// the caller should exit the loop.
pub fn process_command(client: &Client, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(String::new());
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or("").to_lowercase();
    let rest: Vec<&str> = parts.collect();

    Some(match command.as_str() {
        "exit" => return None,
        "help" => HELP_TEXT.to_string(),
        "addtowhitelist" | "awl" => add_to_list(client, "whitelist", &rest),
        "removefromwhitelist" | "rwl" => remove_from_list(client, "whitelist", &rest),
        "isinwhitelist" | "iwl" => is_in_list(client, "whitelist", &rest),
        "allinwhitelist" | "allwl" => all_in_list(client, "whitelist"),
        "addtoblacklist" | "abl" => add_to_list(client, "blacklist", &rest),
        "removefromblacklist" | "rbl" => remove_from_list(client, "blacklist", &rest),
        "isinblacklist" | "ibl" => is_in_list(client, "blacklist", &rest),
        "allinblacklist" | "allbl" => all_in_list(client, "blacklist"),
        "request" | "req" => request(client, &rest),
        "clearbucketbylogin" | "cbl" => clear_bucket(client, "/clearbucketbylogin/", &rest),
        "clearbucketbyip" | "cbip" => clear_bucket(client, "/clearbucketbyip/", &rest),
        other => format!("unknown command: {other} (try \"help\")"),
    })
}

fn add_to_list(client: &Client, list: &str, args: &[&str]) -> String {
    let Some(arg) = args.first() else {
        return format!("usage: addto{list} <ip>/<mask>");
    };
    match parse_cidr_arg(arg) {
        Err(err) => format!("error: {err}"),
        Ok((ip, mask)) => match client.add_to_list(list, &ip, mask) {
            Ok(resp) if resp.text == "OK!" => {
                format!("added {ip}/{mask} to {list} (id {})", resp.code)
            }
            Ok(resp) => format!("error: {}", resp.text),
            Err(err) => format!("error: {err}"),
        },
    }
}

fn remove_from_list(client: &Client, list: &str, args: &[&str]) -> String {
    let Some(arg) = args.first() else {
        return format!("usage: removefrom{list} <ip>/<mask>");
    };
    match parse_cidr_arg(arg) {
        Err(err) => format!("error: {err}"),
        Ok((ip, mask)) => match client.remove_from_list(list, &ip, mask) {
            Ok(resp) if resp.text == "OK!" => format!("removed {ip}/{mask} from {list}"),
            Ok(resp) => format!("error: {}", resp.text),
            Err(err) => format!("error: {err}"),
        },
    }
}

fn is_in_list(client: &Client, list: &str, args: &[&str]) -> String {
    let Some(arg) = args.first() else {
        return format!("usage: isin{list} <ip>/<mask>");
    };
    match parse_cidr_arg(arg) {
        Err(err) => format!("error: {err}"),
        Ok((ip, mask)) => match client.is_in_list(list, &ip, mask) {
            Ok(resp) if resp.message.code == 0 => {
                format!("{ip}/{mask} in {list}: {}", resp.message.text)
            }
            Ok(resp) => format!("error: {}", resp.message.text),
            Err(err) => format!("error: {err}"),
        },
    }
}

fn all_in_list(client: &Client, list: &str) -> String {
    match client.all_in_list(list) {
        Ok(resp) if resp.message.code == 0 => {
            if resp.ip_list.is_empty() {
                format!("{list} is empty")
            } else {
                resp.ip_list
                    .iter()
                    .map(|e| format!("{} {}/{}", e.id, e.ip, e.mask))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Ok(resp) => format!("error: {}", resp.message.text),
        Err(err) => format!("error: {err}"),
    }
}

fn request(client: &Client, args: &[&str]) -> String {
    let (login, password, ip) = match args {
        [login, password, ip] => (login, password, ip),
        _ => return "usage: request <login> <password> <ip>".to_string(),
    };
    match client.check_request(login, password, ip) {
        Ok(resp) => format!("ok={} message={}", resp.ok, resp.message),
        Err(err) => format!("error: {err}"),
    }
}

fn clear_bucket(client: &Client, route: &str, args: &[&str]) -> String {
    let Some(tag) = args.first() else {
        return "usage: clearbucket <tag>".to_string();
    };
    match client.clear_bucket(route, tag) {
        Ok(resp) if resp.text == "OK!" => format!("cleared bucket for {tag}"),
        Ok(resp) => format!("error: {}", resp.text),
        Err(err) => format!("error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cidr_arg_splits_on_slash() {
        assert_eq!(parse_cidr_arg("10.0.0.0/8").unwrap(), ("10.0.0.0".to_string(), 8));
    }

    #[test]
    fn parse_cidr_arg_rejects_missing_slash_or_bad_mask() {
        assert!(parse_cidr_arg("10.0.0.0").is_err());
        assert!(parse_cidr_arg("10.0.0.0/abc").is_err());
    }
}
