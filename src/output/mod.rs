mod styling;
mod tables;

use anyhow::Result;
use serde::Serialize;

pub use styling::{dim, magenta_bold};
pub use tables::Tabular;

/// Prints the banner to stderr so stdout stays machine-readable.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🦊 efficient-gitlab"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("GitLab CI/CD API client")
    );
}

pub fn print_json<T: Serialize>(items: &[T], pretty: bool) -> Result<()> {
    println!("{}", render_json(items, pretty)?);
    Ok(())
}

fn render_json<T: Serialize>(items: &[T], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(items)?
    } else {
        serde_json::to_string(items)?
    };
    Ok(json)
}

pub fn print_table<T: Tabular>(items: &[T]) {
    if items.is_empty() {
        eprintln!("{}", dim("No results"));
        return;
    }
    println!("{}", tables::render(items));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Row {
        project_id: u64,
    }

    #[test]
    fn test_render_json_compact_and_pretty() {
        let rows = [Row { project_id: 7 }];
        assert_eq!(render_json(&rows, false).unwrap(), r#"[{"projectId":7}]"#);
        assert!(render_json(&rows, true).unwrap().contains("\n  {\n"));
    }
}
