use clap::{Parser, Subcommand};

/// Command line surface of the console front end.
#[derive(Parser, Debug)]
#[command(name = "accord-console")]
#[command(version)]
#[command(about = "Browse activity logs, detect conflicts and manage action constraints")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Fetch the activity log window for a day and print one page of it
    Logs {
        /// Calendar day to fetch, YYYY-MM-DD (clamped to today)
        #[arg(long)]
        date: String,

        /// Page to print
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
    },
    /// Fetch the log window, then run conflict detection over it
    Detect {
        /// Calendar day to inspect, YYYY-MM-DD (clamped to today)
        #[arg(long)]
        date: String,
    },
    /// List action constraints with a staggered reveal
    Constraints {
        /// Calendar day to list, YYYY-MM-DD (clamped to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Submit one action constraint per --action for a file and user
    AddConstraint {
        /// Display name of the file
        #[arg(long)]
        file_name: String,

        /// Backend identifier of the file
        #[arg(long)]
        file_id: String,

        /// User the constraint applies to
        #[arg(long)]
        user: String,

        /// Constrained action, e.g. move, edit, delete or "add permission"
        #[arg(long = "action", required = true)]
        actions: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, Command};

    #[test]
    fn logs_defaults_to_first_page() {
        let args = Args::parse_from(["accord-console", "logs", "--date", "2024-01-01"]);
        assert_eq!(
            args.command,
            Command::Logs {
                date: "2024-01-01".to_owned(),
                page: 1,
            }
        );
    }

    #[test]
    fn logs_rejects_page_zero() {
        let result = Args::try_parse_from([
            "accord-console",
            "logs",
            "--date",
            "2024-01-01",
            "--page",
            "0",
        ]);
        assert!(
            matches!(result, Err(error) if error.kind() == clap::error::ErrorKind::ValueValidation)
        );
    }

    #[test]
    fn constraints_date_is_optional() {
        let args = Args::parse_from(["accord-console", "constraints"]);
        assert_eq!(args.command, Command::Constraints { date: None });
    }

    #[test]
    fn add_constraint_collects_repeated_actions() {
        let args = Args::parse_from([
            "accord-console",
            "add-constraint",
            "--file-name",
            "Budget",
            "--file-id",
            "file-1",
            "--user",
            "bob@example.com",
            "--action",
            "move",
            "--action",
            "add permission",
        ]);

        let Command::AddConstraint { actions, .. } = args.command else {
            unreachable!();
        };
        assert_eq!(actions, vec!["move".to_owned(), "add permission".to_owned()]);
    }

    #[test]
    fn add_constraint_requires_an_action() {
        let result = Args::try_parse_from([
            "accord-console",
            "add-constraint",
            "--file-name",
            "Budget",
            "--file-id",
            "file-1",
            "--user",
            "bob@example.com",
        ]);
        assert!(matches!(
            result,
            Err(error) if error.kind() == clap::error::ErrorKind::MissingRequiredArgument
        ));
    }
}
