use crate::plan::{run_departments, run_projection, DepartmentsArgs, ProjectArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use workforce_planning::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Workforce Planner",
    about = "Project workforce demand, supply and the gap between them",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Project demand, supply and gap tables for a planning horizon
    Project(ProjectArgs),
    /// Show the department weights used for micro demand
    Departments(DepartmentsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Project(args) => run_projection(args),
        Command::Departments(args) => run_departments(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::OutputFormat;
    use clap::CommandFactory;
    use workforce_planning::projection::Percent;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn project_defaults_match_the_case_study() {
        let cli = Cli::try_parse_from(["workforce-planner", "project"]).expect("parses");
        match cli.command {
            Some(Command::Project(args)) => {
                assert_eq!(args.starting_headcount, 210);
                assert_eq!(args.growth_rate, Percent::from_basis_points(1_200));
                assert_eq!(args.attrition_rate, Percent::from_basis_points(800));
                assert_eq!(args.horizon_years, 5);
                assert_eq!(args.format, OutputFormat::Table);
            }
            other => panic!("expected project command, got {other:?}"),
        }
    }

    #[test]
    fn project_accepts_negative_growth_and_csv_format() {
        let cli = Cli::try_parse_from([
            "workforce-planner",
            "project",
            "--growth-rate",
            "-5",
            "--format",
            "csv",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Project(args)) => {
                assert_eq!(args.growth_rate, Percent::from_basis_points(-500));
                assert_eq!(args.format, OutputFormat::Csv);
            }
            other => panic!("expected project command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["workforce-planner"]).expect("parses");
        assert!(cli.command.is_none());
    }
}
