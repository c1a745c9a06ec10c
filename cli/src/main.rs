//! Command-line driver for the VentureDesk REST API.
//!
//! Shares the library's resource clients and session handling; only the
//! transport (`reqwest`) and the token slot (a file) are native.

mod token_file;
mod transport;


use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use venturedesk::net::types::{
    ActivityField, Company, Contact, Entrepreneur, FinancialReport, Id, ReportPeriod, Review, Skill, UserSkill,
};
use venturedesk::net::{ApiClient, ApiConfig, ApiError, ApiServices};
use venturedesk::session::DecodeError;

use crate::token_file::{DEFAULT_TOKEN_FILE, FileTokenStore};
use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("session token: {0}")]
    Session(#[from] DecodeError),
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "venturedesk", about = "VentureDesk API command-line client")]
struct Cli {
    #[arg(long, env = "VENTUREDESK_API_URL", default_value = venturedesk::net::config::DEFAULT_API_URL)]
    base_url: String,

    #[arg(long, env = "VENTUREDESK_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    token_file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token.
    Login(Credentials),
    /// Create an account (does not sign in).
    Register(Credentials),
    /// Forget the stored session token.
    Logout,
    /// Print the claims of the stored session token.
    Whoami,
    #[command(subcommand)]
    Entrepreneurs(EntrepreneurCommand),
    #[command(subcommand)]
    Companies(CompanyCommand),
    #[command(subcommand)]
    Contacts(ContactCommand),
    #[command(subcommand)]
    Skills(SkillCommand),
    #[command(subcommand)]
    UserSkills(UserSkillCommand),
    #[command(subcommand)]
    ActivityFields(ActivityFieldCommand),
    #[command(subcommand)]
    Financials(FinancialCommand),
    #[command(subcommand)]
    Reviews(ReviewCommand),
}

#[derive(Args, Debug)]
struct Credentials {
    login: String,
    #[arg(long, env = "VENTUREDESK_PASSWORD")]
    password: String,
}

#[derive(Args, Debug)]
struct PageArg {
    #[arg(long, default_value_t = 1)]
    page: u32,
}

#[derive(Args, Debug)]
struct OwnedListArgs {
    #[arg(long = "entrepreneur")]
    entrepreneur: Id,
    #[arg(long, default_value_t = 1)]
    page: u32,
}

// =============================================================================
// RESOURCE SUBCOMMANDS
// =============================================================================

#[derive(Subcommand, Debug)]
enum EntrepreneurCommand {
    List {
        #[arg(long)]
        page: Option<u32>,
    },
    /// Entrepreneurs without any company.
    ListEmpty(PageArg),
    Get {
        id: Id,
    },
    Rating {
        id: Id,
    },
    Update {
        id: Id,
        #[command(flatten)]
        fields: EntrepreneurFields,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug, Default)]
struct EntrepreneurFields {
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    birthday: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    city: Option<String>,
}

#[derive(Subcommand, Debug)]
enum CompanyCommand {
    List(OwnedListArgs),
    Get {
        id: Id,
    },
    Create(CompanyFields),
    Update {
        id: Id,
        #[command(flatten)]
        fields: CompanyFields,
    },
    Delete {
        id: Id,
    },
    /// Reports for a range of quarters, e.g. `2021_1-2022_4`.
    Financials {
        id: Id,
        period: ReportPeriod,
    },
}

#[derive(Args, Debug, Default)]
struct CompanyFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    activity_field: Option<Id>,
    #[arg(long)]
    city: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ContactCommand {
    List {
        #[arg(long = "entrepreneur")]
        entrepreneur: Id,
    },
    Get {
        id: Id,
    },
    Create(ContactFields),
    Update {
        id: Id,
        #[command(flatten)]
        fields: ContactFields,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug, Default)]
struct ContactFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    value: Option<String>,
}

#[derive(Subcommand, Debug)]
enum SkillCommand {
    List {
        #[arg(long)]
        page: Option<u32>,
    },
    Get {
        id: Id,
    },
    Create(DescribedFields),
    Update {
        id: Id,
        #[command(flatten)]
        fields: DescribedFields,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug, Default)]
struct DescribedFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand, Debug)]
enum UserSkillCommand {
    List(OwnedListArgs),
    Create {
        #[arg(long = "user")]
        user_id: Id,
        #[arg(long = "skill")]
        skill_id: Id,
    },
    Delete {
        id: Id,
    },
}

#[derive(Subcommand, Debug)]
enum ActivityFieldCommand {
    /// All fields, or one page with `--page`.
    List {
        #[arg(long)]
        page: Option<u32>,
    },
    Get {
        id: Id,
    },
    Create(ActivityFieldFields),
    Update {
        id: Id,
        #[command(flatten)]
        fields: ActivityFieldFields,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug, Default)]
struct ActivityFieldFields {
    #[command(flatten)]
    described: DescribedFields,
    #[arg(long)]
    cost: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum FinancialCommand {
    Get {
        id: Id,
    },
    /// Last year's totals for an entrepreneur.
    LastYear {
        #[arg(long = "entrepreneur")]
        entrepreneur: Id,
    },
    Create(ReportFields),
    Update {
        id: Id,
        #[command(flatten)]
        fields: ReportFields,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug, Default)]
struct ReportFields {
    #[arg(long = "company")]
    company_id: Option<Id>,
    #[arg(long)]
    revenue: Option<f64>,
    #[arg(long)]
    costs: Option<f64>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    quarter: Option<u8>,
}

#[derive(Subcommand, Debug)]
enum ReviewCommand {
    /// Reviews written by the signed-in user.
    Mine(PageArg),
    List(OwnedListArgs),
    Get {
        id: Id,
    },
    Create(ReviewFields),
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug, Default)]
struct ReviewFields {
    #[arg(long = "target")]
    target_id: Option<Id>,
    #[arg(long = "reviewer")]
    reviewer_id: Option<Id>,
    #[arg(long)]
    pros: Option<String>,
    #[arg(long)]
    cons: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    rating: Option<i32>,
}

// =============================================================================
// FIELD -> DTO
// =============================================================================

impl EntrepreneurFields {
    fn into_dto(self, id: &Id) -> Entrepreneur {
        Entrepreneur {
            id: Some(id.clone()),
            username: self.username,
            full_name: self.full_name,
            birthday: self.birthday,
            gender: self.gender,
            city: self.city,
            role: None,
        }
    }
}

impl From<CompanyFields> for Company {
    fn from(fields: CompanyFields) -> Self {
        Self { name: fields.name, activity_field: fields.activity_field, city: fields.city, ..Self::default() }
    }
}

impl From<ContactFields> for Contact {
    fn from(fields: ContactFields) -> Self {
        Self { name: fields.name, value: fields.value, ..Self::default() }
    }
}

impl From<DescribedFields> for Skill {
    fn from(fields: DescribedFields) -> Self {
        Self { name: fields.name, description: fields.description, ..Self::default() }
    }
}

impl From<ActivityFieldFields> for ActivityField {
    fn from(fields: ActivityFieldFields) -> Self {
        Self {
            name: fields.described.name,
            description: fields.described.description,
            cost: fields.cost,
            ..Self::default()
        }
    }
}

impl From<ReportFields> for FinancialReport {
    fn from(fields: ReportFields) -> Self {
        Self {
            company_id: fields.company_id,
            revenue: fields.revenue,
            costs: fields.costs,
            year: fields.year,
            quarter: fields.quarter,
            ..Self::default()
        }
    }
}

impl From<ReviewFields> for Review {
    fn from(fields: ReviewFields) -> Self {
        Self {
            reviewer_id: fields.reviewer_id,
            target_id: fields.target_id,
            pros: fields.pros,
            cons: fields.cons,
            description: fields.description,
            rating: fields.rating,
            ..Self::default()
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::new(&cli.base_url);
    tracing::debug!(base_url = %config.base_url, token_file = %cli.token_file, "starting");

    let api = ApiClient::new(
        Arc::new(ReqwestTransport::new(config)),
        Arc::new(FileTokenStore::new(&cli.token_file)),
    );
    let services = ApiServices::new(api);

    if let Some(output) = run(cli.command, &services).await? {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

/// Execute one command; `Some` is printed as pretty JSON.
async fn run(command: Command, services: &ApiServices) -> Result<Option<Value>, CliError> {
    let output = match command {
        Command::Login(creds) => {
            let data = services.auth.login(&creds.login, &creds.password).await?;
            tracing::info!(login = %creds.login, "signed in");
            json!({ "token": data.token, "data": data.extra })
        }
        Command::Register(creds) => {
            services.auth.register(&creds.login, &creds.password).await?;
            json!({ "registered": creds.login })
        }
        Command::Logout => {
            services.auth.logout();
            return Ok(None);
        }
        Command::Whoami => {
            let claims = services.session.decode()?;
            json!({ "sub": claims.sub, "role": claims.role, "claims": claims.extra })
        }
        Command::Entrepreneurs(command) => run_entrepreneurs(command, services).await?,
        Command::Companies(command) => run_companies(command, services).await?,
        Command::Contacts(command) => run_contacts(command, services).await?,
        Command::Skills(command) => run_skills(command, services).await?,
        Command::UserSkills(command) => run_user_skills(command, services).await?,
        Command::ActivityFields(command) => run_activity_fields(command, services).await?,
        Command::Financials(command) => run_financials(command, services).await?,
        Command::Reviews(command) => run_reviews(command, services).await?,
    };
    Ok(Some(output))
}

async fn run_entrepreneurs(command: EntrepreneurCommand, services: &ApiServices) -> Result<Value, ApiError> {
    let client = &services.entrepreneurs;
    match command {
        EntrepreneurCommand::List { page } => client.list(page, &[]).await,
        EntrepreneurCommand::ListEmpty(arg) => client.list_empty(arg.page).await,
        EntrepreneurCommand::Get { id } => client.get_by_id(id).await,
        EntrepreneurCommand::Rating { id } => client.rating(id).await,
        EntrepreneurCommand::Update { id, fields } => client.update(&id, &fields.into_dto(&id)).await,
        EntrepreneurCommand::Delete { id } => client.delete(id).await,
    }
}

async fn run_companies(command: CompanyCommand, services: &ApiServices) -> Result<Value, ApiError> {
    let client = &services.companies;
    match command {
        CompanyCommand::List(args) => client.list_for_entrepreneur(args.entrepreneur, args.page).await,
        CompanyCommand::Get { id } => client.get_by_id(id).await,
        CompanyCommand::Create(fields) => client.create(&fields.into()).await,
        CompanyCommand::Update { id, fields } => client.update(id, &fields.into()).await,
        CompanyCommand::Delete { id } => client.delete(id).await,
        CompanyCommand::Financials { id, period } => client.financials_for_period(id, period).await,
    }
}

async fn run_contacts(command: ContactCommand, services: &ApiServices) -> Result<Value, ApiError> {
    let client = &services.contacts;
    match command {
        ContactCommand::List { entrepreneur } => client.list_for_entrepreneur(entrepreneur).await,
        ContactCommand::Get { id } => client.get_by_id(id).await,
        ContactCommand::Create(fields) => client.create(&fields.into()).await,
        ContactCommand::Update { id, fields } => client.update(id, &fields.into()).await,
        ContactCommand::Delete { id } => client.delete(id).await,
    }
}

async fn run_skills(command: SkillCommand, services: &ApiServices) -> Result<Value, ApiError> {
    let client = &services.skills;
    match command {
        SkillCommand::List { page } => client.list(page, &[]).await,
        SkillCommand::Get { id } => client.get_by_id(id).await,
        SkillCommand::Create(fields) => client.create(&fields.into()).await,
        SkillCommand::Update { id, fields } => client.update(id, &fields.into()).await,
        SkillCommand::Delete { id } => client.delete(id).await,
    }
}

async fn run_user_skills(command: UserSkillCommand, services: &ApiServices) -> Result<Value, ApiError> {
    let client = &services.user_skills;
    match command {
        UserSkillCommand::List(args) => client.list_for_entrepreneur(args.entrepreneur, args.page).await,
        UserSkillCommand::Create { user_id, skill_id } => {
            let link = UserSkill { id: None, user_id: Some(user_id), skill_id: Some(skill_id) };
            client.create(&link).await
        }
        UserSkillCommand::Delete { id } => client.delete(id).await,
    }
}

async fn run_activity_fields(command: ActivityFieldCommand, services: &ApiServices) -> Result<Value, ApiError> {
    let client = &services.activity_fields;
    match command {
        ActivityFieldCommand::List { page } => client.list(page, &[]).await,
        ActivityFieldCommand::Get { id } => client.get_by_id(id).await,
        ActivityFieldCommand::Create(fields) => client.create(&fields.into()).await,
        ActivityFieldCommand::Update { id, fields } => client.update(id, &fields.into()).await,
        ActivityFieldCommand::Delete { id } => client.delete(id).await,
    }
}

async fn run_financials(command: FinancialCommand, services: &ApiServices) -> Result<Value, ApiError> {
    let client = &services.financials;
    match command {
        FinancialCommand::Get { id } => client.get_by_id(id).await,
        FinancialCommand::LastYear { entrepreneur } => client.last_year_for_entrepreneur(entrepreneur).await,
        FinancialCommand::Create(fields) => client.create_for_company(&fields.into()).await,
        FinancialCommand::Update { id, fields } => {
            let report = FinancialReport { id: Some(id.clone()), ..FinancialReport::from(fields) };
            client.update(id, &report).await
        }
        FinancialCommand::Delete { id } => client.delete(id).await,
    }
}

async fn run_reviews(command: ReviewCommand, services: &ApiServices) -> Result<Value, ApiError> {
    let client = &services.reviews;
    match command {
        ReviewCommand::Mine(arg) => client.list_mine(arg.page).await,
        ReviewCommand::List(args) => client.list_for_entrepreneur(args.entrepreneur, args.page).await,
        ReviewCommand::Get { id } => client.get_by_id(id).await,
        ReviewCommand::Create(fields) => client.create(&fields.into()).await,
        ReviewCommand::Delete { id } => client.delete(id).await,
    }
}
