//! `stockdesk` command line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Datelike, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use stockdesk_auth::{LoginForm, Role, Route, RouteDecision, TokenStorage, guard};
use stockdesk_client::confirm::is_affirmative;
use stockdesk_client::error::Level;
use stockdesk_client::format::{format_date_time, format_number, truncate, DEFAULT_TRUNCATE};
use stockdesk_client::pages::{
    AdminPage, AdminResource, CategoriesPage, DashboardPage, MovementsPage, Notices,
    ProductsPage, StockAlertsPage, UsersPage, WarehousesPage,
};
use stockdesk_client::{
    ClientConfig, Confirmation, Confirmed, Notification, ReportFormat, ReportKind, ReportRequest,
    Session, SubmitError, open_session,
};
use stockdesk_core::{CategoryId, Entity, MovementId, ProductId, UserId, WarehouseId};
use stockdesk_inventory::{MovementType, StockLevels, WarehouseSelection};

#[derive(Parser)]
#[command(name = "stockdesk", about = "Inventory management from the command line", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Auth(AuthCommands),
    #[command(subcommand)]
    Products(ProductsCommands),
    #[command(subcommand)]
    Categories(CategoriesCommands),
    #[command(subcommand)]
    Warehouses(WarehousesCommands),
    #[command(subcommand)]
    Users(UsersCommands),
    #[command(subcommand)]
    Movements(MovementsCommands),
    /// Stock status of every product.
    Alerts(AlertsArgs),
    /// Headline numbers and monthly rankings.
    Dashboard,
    /// Download a report into a directory.
    Report(ReportArgs),
}

#[derive(Subcommand)]
enum AuthCommands {
    Login(LoginArgs),
    Logout,
    Whoami,
}

#[derive(Args)]
struct LoginArgs {
    #[arg(long, help = "Email address of the account")]
    email: String,
    #[arg(long, env = "STOCKDESK_PASSWORD", hide_env_values = true, help = "Account password")]
    password: String,
}

#[derive(Subcommand)]
enum ProductsCommands {
    List {
        #[arg(long)]
        warehouse: Option<WarehouseId>,
        #[arg(long, help = "Match name or SKU")]
        search: Option<String>,
    },
    Create(ProductArgs),
    Update {
        id: ProductId,
        #[command(flatten)]
        fields: ProductArgs,
    },
    Delete {
        id: ProductId,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Args)]
struct ProductArgs {
    #[arg(long)]
    sku: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<CategoryId>,
    #[arg(long)]
    warehouse: Option<WarehouseId>,
    #[arg(long = "min", help = "Minimum stock")]
    min_stock: Option<String>,
    #[arg(long = "max", help = "Maximum stock")]
    max_stock: Option<String>,
}

#[derive(Subcommand)]
enum CategoriesCommands {
    List,
    Create(CategoryArgs),
    Update {
        id: CategoryId,
        #[command(flatten)]
        fields: CategoryArgs,
    },
    Delete {
        id: CategoryId,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct CategoryArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long, conflicts_with = "global")]
    warehouse: Option<WarehouseId>,
    #[arg(long, help = "Make the category visible in every warehouse")]
    global: bool,
}

#[derive(Subcommand)]
enum WarehousesCommands {
    List,
    Create(WarehouseArgs),
    Update {
        id: WarehouseId,
        #[command(flatten)]
        fields: WarehouseArgs,
    },
    Delete {
        id: WarehouseId,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct WarehouseArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long, help = "Address; pass an empty string to clear it")]
    location: Option<String>,
}

#[derive(Subcommand)]
enum UsersCommands {
    List,
    Create(UserArgs),
    Update {
        id: UserId,
        #[command(flatten)]
        fields: UserArgs,
    },
    Delete {
        id: UserId,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct UserArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, help = "New password; omit on update to keep the current one")]
    password: Option<String>,
    #[arg(long, help = "administrador or colaborador")]
    role: Option<Role>,
}

#[derive(Subcommand)]
enum MovementsCommands {
    List {
        #[arg(long)]
        warehouse: Option<WarehouseId>,
    },
    Show {
        id: MovementId,
    },
    Record(RecordArgs),
}

#[derive(Args)]
struct RecordArgs {
    #[arg(long, default_value = "entrada", help = "entrada or salida")]
    kind: MovementType,
    #[arg(long)]
    product: ProductId,
    #[arg(long, help = "Whole number of units")]
    quantity: String,
    #[arg(long)]
    note: Option<String>,
    #[arg(long, help = "Restrict product choice to this warehouse")]
    warehouse: Option<WarehouseId>,
}

#[derive(Args)]
struct AlertsArgs {
    #[arg(long)]
    warehouse: Option<WarehouseId>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long, help = "Only products with low stock")]
    low: bool,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(value_parser = ["inventory", "low-stock", "movements"])]
    kind: String,
    #[arg(long, help = "Defaults to the current year")]
    year: Option<i32>,
    #[arg(long, help = "1-12, defaults to the current month")]
    month: Option<u32>,
    #[arg(long, default_value = "csv")]
    format: ReportFormat,
    #[arg(long)]
    warehouse: Option<WarehouseId>,
    #[arg(long, default_value = ".", help = "Directory to write the file into")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    stockdesk_observability::init();
    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("failed to read configuration")?;
    let mut session = open_session(&config).context("failed to build API client")?;

    match cli.command {
        Commands::Auth(command) => handle_auth(&mut session, &config, command, cli.json).await,
        command => {
            restore(&mut session, &config).await;
            dispatch(&mut session, command, cli.json).await
        }
    }
}

async fn dispatch<S: TokenStorage>(
    session: &mut Session<S>,
    command: Commands,
    json: bool,
) -> Result<()> {
    match command {
        Commands::Auth(_) => Ok(()),
        Commands::Products(command) => handle_products(session, command, json).await,
        Commands::Categories(command) => handle_categories(session, command, json).await,
        Commands::Warehouses(command) => handle_warehouses(session, command, json).await,
        Commands::Users(command) => handle_users(session, command, json).await,
        Commands::Movements(command) => handle_movements(session, command, json).await,
        Commands::Alerts(args) => handle_alerts(session, args, json).await,
        Commands::Dashboard => handle_dashboard(session, json).await,
        Commands::Report(args) => handle_report(session, args).await,
    }
}

async fn restore<S: TokenStorage>(session: &mut Session<S>, config: &ClientConfig) {
    match &config.auth_token {
        Some(token) => {
            debug!("using token from STOCKDESK_AUTH_TOKEN");
            session.restore_with_token(token).await;
        }
        None => {
            session.restore().await;
        }
    }
}

/// Apply the route guard for the screen a command stands for.
fn require<S: TokenStorage>(session: &Session<S>, route: Route) -> Result<()> {
    match guard(session.state(), route) {
        RouteDecision::Allow => Ok(()),
        RouteDecision::Pending => bail!("session verification did not complete"),
        RouteDecision::Redirect(Route::Login) => {
            bail!("not logged in; run `stockdesk auth login` first")
        }
        RouteDecision::Redirect(_) => bail!("this command requires the administrador role"),
    }
}

async fn handle_auth<S: TokenStorage>(
    session: &mut Session<S>,
    config: &ClientConfig,
    command: AuthCommands,
    json: bool,
) -> Result<()> {
    match command {
        AuthCommands::Login(args) => {
            let form = LoginForm { email: args.email, password: args.password };
            let user = match session.login(&form).await {
                Ok(user) => user,
                Err(SubmitError::Api(err)) => {
                    let message = match err {
                        stockdesk_client::ApiError::Rejected { message, .. }
                        | stockdesk_client::ApiError::Unauthorized(message) => message,
                        other => other.to_string(),
                    };
                    bail!("login failed: {message}");
                }
                Err(err) => return Err(submit_failure(err)),
            };
            if json {
                print_json(&user)?;
            } else {
                println!("Logged in as {} <{}> ({})", user.name, user.email, user.role);
                println!("Session saved to: {}", config.session_file.display());
            }
        }
        AuthCommands::Logout => {
            session.logout();
            if !json {
                println!("Logged out");
            }
        }
        AuthCommands::Whoami => {
            restore(session, config).await;
            let Some(user) = session.user() else {
                bail!("not logged in; run `stockdesk auth login` first");
            };
            if json {
                print_json(user)?;
            } else {
                println!("{} <{}> • role {} • id {}", user.name, user.email, user.role, user.id);
            }
        }
    }
    Ok(())
}

async fn handle_products<S: TokenStorage>(
    session: &mut Session<S>,
    command: ProductsCommands,
    json: bool,
) -> Result<()> {
    require(session, Route::Products)?;
    let mut page = ProductsPage::new();
    page.load(session).await.context("failed to load products")?;

    match command {
        ProductsCommands::List { warehouse, search } => {
            page.select_warehouse(session, warehouse.into()).await?;
            if let Some(term) = search {
                page.search(session, &term).await?;
            }
            if json {
                print_json(&page.products())?;
            } else {
                for p in page.products() {
                    println!(
                        "- #{} {} • SKU {} • {} • stock {} (min {}, max {}) • {}",
                        p.id,
                        truncate(&p.name, DEFAULT_TRUNCATE),
                        p.sku,
                        p.category_label.as_deref().unwrap_or("sin categoría"),
                        format_number(p.stock),
                        p.min_stock,
                        p.max_stock,
                        p.stock_status().label()
                    );
                }
            }
        }
        ProductsCommands::Create(fields) => {
            page.open_create();
            fill_product(&mut page, fields);
            let result = page.submit(session).await;
            finish(result, &mut page.notices)?;
        }
        ProductsCommands::Update { id, fields } => {
            if !page.open_edit(id) {
                bail!("product {id} not found");
            }
            fill_product(&mut page, fields);
            let result = page.submit(session).await;
            finish(result, &mut page.notices)?;
        }
        ProductsCommands::Delete { id, yes } => {
            let confirmation = page
                .confirm_delete(id)
                .ok_or_else(|| anyhow!("product {id} not found"))?;
            let Some(confirmed) = ask(confirmation, yes)? else {
                println!("Cancelled");
                return Ok(());
            };
            let result = page.delete(session, confirmed).await;
            finish(result, &mut page.notices)?;
        }
    }
    print_notices(&mut page.notices);
    Ok(())
}

fn fill_product(page: &mut ProductsPage, args: ProductArgs) {
    if args.warehouse.is_some() {
        page.set_form_warehouse(args.warehouse);
    }
    if args.category.is_some() {
        page.set_form_category(args.category);
    }
    let Some(editor) = page.editor_mut() else {
        return;
    };
    let form = &mut editor.form;
    if let Some(sku) = args.sku {
        form.sku = sku;
    }
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(min) = args.min_stock {
        form.min_stock = min;
    }
    if let Some(max) = args.max_stock {
        form.max_stock = max;
    }
}

async fn handle_categories<S: TokenStorage>(
    session: &mut Session<S>,
    command: CategoriesCommands,
    json: bool,
) -> Result<()> {
    require(session, Route::Categories)?;
    let mut page = CategoriesPage::new();
    page.load(session).await.context("failed to load data")?;

    let fill = |page: &mut CategoriesPage, args: CategoryArgs| {
        if let Some(editor) = page.editor_mut() {
            if let Some(name) = args.name {
                editor.form.name = name;
            }
            if args.global {
                editor.form.warehouse_id = None;
            } else if args.warehouse.is_some() {
                editor.form.warehouse_id = args.warehouse;
            }
        }
    };

    match command {
        CategoriesCommands::List => {
            if json {
                print_json(&page.rows())?;
            } else {
                for c in page.rows() {
                    let scope = c
                        .warehouse_id
                        .map_or_else(|| "global".to_string(), |w| format!("almacén {w}"));
                    println!("- #{} {} • {}", c.id, c.name, scope);
                }
            }
        }
        CategoriesCommands::Create(args) => {
            page.open_create();
            fill(&mut page, args);
            submit_admin(session, &mut page).await?;
        }
        CategoriesCommands::Update { id, fields } => {
            open_admin_edit(&mut page, id)?;
            fill(&mut page, fields);
            submit_admin(session, &mut page).await?;
        }
        CategoriesCommands::Delete { id, yes } => delete_admin(session, &mut page, id, yes).await?,
    }
    print_notices(&mut page.notices);
    Ok(())
}

async fn handle_warehouses<S: TokenStorage>(
    session: &mut Session<S>,
    command: WarehousesCommands,
    json: bool,
) -> Result<()> {
    require(session, Route::Warehouses)?;
    let mut page = WarehousesPage::new();
    page.load(session).await.context("failed to load data")?;

    let fill = |page: &mut WarehousesPage, args: WarehouseArgs| {
        if let Some(editor) = page.editor_mut() {
            if let Some(name) = args.name {
                editor.form.name = name;
            }
            if let Some(location) = args.location {
                editor.form.location = location;
            }
        }
    };

    match command {
        WarehousesCommands::List => {
            if json {
                print_json(&page.rows())?;
            } else {
                for w in page.rows() {
                    println!("- #{} {} • {}", w.id, w.name, w.location.as_deref().unwrap_or("-"));
                }
            }
        }
        WarehousesCommands::Create(args) => {
            page.open_create();
            fill(&mut page, args);
            submit_admin(session, &mut page).await?;
        }
        WarehousesCommands::Update { id, fields } => {
            open_admin_edit(&mut page, id)?;
            fill(&mut page, fields);
            submit_admin(session, &mut page).await?;
        }
        WarehousesCommands::Delete { id, yes } => delete_admin(session, &mut page, id, yes).await?,
    }
    print_notices(&mut page.notices);
    Ok(())
}

async fn handle_users<S: TokenStorage>(
    session: &mut Session<S>,
    command: UsersCommands,
    json: bool,
) -> Result<()> {
    require(session, Route::Users)?;
    let mut page = UsersPage::new();
    page.load(session).await.context("failed to load data")?;

    let fill = |page: &mut UsersPage, args: UserArgs| {
        if let Some(editor) = page.editor_mut() {
            let form = &mut editor.form;
            if let Some(name) = args.name {
                form.name = name;
            }
            if let Some(email) = args.email {
                form.email = email;
            }
            if let Some(password) = args.password {
                form.password = password;
            }
            if let Some(role) = args.role {
                form.role = role;
            }
        }
    };

    match command {
        UsersCommands::List => {
            if json {
                print_json(&page.rows())?;
            } else {
                for u in page.rows() {
                    println!("- #{} {} <{}> • {}", u.id, u.name, u.email, u.role);
                }
            }
        }
        UsersCommands::Create(args) => {
            page.open_create();
            fill(&mut page, args);
            submit_admin(session, &mut page).await?;
        }
        UsersCommands::Update { id, fields } => {
            open_admin_edit(&mut page, id)?;
            fill(&mut page, fields);
            submit_admin(session, &mut page).await?;
        }
        UsersCommands::Delete { id, yes } => delete_admin(session, &mut page, id, yes).await?,
    }
    print_notices(&mut page.notices);
    Ok(())
}

fn open_admin_edit<R: AdminResource>(
    page: &mut AdminPage<R>,
    id: <R::Row as Entity>::Id,
) -> Result<()>
where
    <R::Row as Entity>::Id: std::fmt::Display,
{
    if page.open_edit(id) {
        Ok(())
    } else {
        bail!("no {} entry with id {id}", R::NAME)
    }
}

async fn submit_admin<R: AdminResource, S: TokenStorage>(
    session: &mut Session<S>,
    page: &mut AdminPage<R>,
) -> Result<()> {
    let result = page.submit(session).await;
    finish(result, &mut page.notices)
}

async fn delete_admin<R: AdminResource, S: TokenStorage>(
    session: &mut Session<S>,
    page: &mut AdminPage<R>,
    id: <R::Row as Entity>::Id,
    yes: bool,
) -> Result<()>
where
    <R::Row as Entity>::Id: std::fmt::Display,
{
    let confirmation = page
        .confirm_delete(id)
        .ok_or_else(|| anyhow!("no {} entry with id {id}", R::NAME))?;
    let Some(confirmed) = ask(confirmation, yes)? else {
        println!("Cancelled");
        return Ok(());
    };
    let result = page.delete(session, confirmed).await;
    finish(result, &mut page.notices)
}

async fn handle_movements<S: TokenStorage>(
    session: &mut Session<S>,
    command: MovementsCommands,
    json: bool,
) -> Result<()> {
    require(session, Route::Movements)?;
    let mut page = MovementsPage::new();
    page.load(session).await.context("failed to load movements")?;

    match command {
        MovementsCommands::List { warehouse } => {
            page.select_warehouse(session, warehouse.into()).await?;
            if json {
                print_json(&page.movements())?;
            } else {
                for m in page.movements() {
                    println!(
                        "- #{} {} • {} • {} • qty {} • {} → {} • {} • {}",
                        m.id,
                        m.kind,
                        m.product_label.as_deref().unwrap_or("-"),
                        m.warehouse_label.as_deref().unwrap_or("-"),
                        m.quantity,
                        m.stock_before,
                        m.stock_after,
                        m.user_label.as_deref().unwrap_or("-"),
                        m.created_at.as_ref().map(format_date_time).unwrap_or_default()
                    );
                }
            }
        }
        MovementsCommands::Show { id } => {
            let result = session.api().get_movement(id).await;
            let movement = session.observe(result)?;
            if json {
                print_json(&movement)?;
            } else {
                println!(
                    "#{} {} of {} units • stock {} → {} • note: {}",
                    movement.id,
                    movement.kind,
                    movement.quantity,
                    movement.stock_before,
                    movement.stock_after,
                    movement.note.as_deref().unwrap_or("-")
                );
            }
        }
        MovementsCommands::Record(args) => {
            page.open_recorder();
            if args.warehouse.is_some() {
                page.choose_recorder_warehouse(args.warehouse.into());
            }
            let product = page
                .products()
                .iter()
                .find(|p| p.id == args.product)
                .cloned()
                .ok_or_else(|| anyhow!("product {} not found", args.product))?;
            let recorder = page
                .recorder_mut()
                .ok_or_else(|| anyhow!("movement form is not open"))?;
            recorder.select_product(&product)?;
            recorder.set_kind(args.kind);
            recorder.set_quantity(&args.quantity);
            recorder.set_note(args.note.as_deref().unwrap_or_default());

            let result = page.submit(session).await;
            let payload = finish(result, &mut page.notices)?;
            if json {
                print_json(&payload)?;
            } else {
                println!(
                    "Recorded {} of {} units for {}; expected stock {}",
                    payload.kind,
                    payload.quantity,
                    product.display_label(),
                    payload.projected_stock(product.stock)
                );
            }
        }
    }
    print_notices(&mut page.notices);
    Ok(())
}

#[derive(Serialize)]
struct AlertRow<'a> {
    #[serde(flatten)]
    product: &'a stockdesk_inventory::Product,
    status: stockdesk_inventory::StockStatus,
}

async fn handle_alerts<S: TokenStorage>(
    session: &mut Session<S>,
    args: AlertsArgs,
    json: bool,
) -> Result<()> {
    require(session, Route::StockAlerts)?;
    let mut page = StockAlertsPage::new();
    page.load(session).await.context("failed to load data")?;
    page.select_warehouse(session, args.warehouse.into()).await?;
    if let Some(term) = &args.search {
        page.set_search(term);
    }

    let rows: Vec<AlertRow<'_>> = page
        .rows()
        .into_iter()
        .filter(|(_, status)| !args.low || *status == stockdesk_inventory::StockStatus::Bajo)
        .map(|(product, status)| AlertRow { product, status })
        .collect();
    let summary = page.summary();

    if json {
        print_json(&serde_json::json!({ "summary": summary, "products": rows }))?;
    } else {
        println!(
            "Total {} • bajo {} • medio {} • suficiente {}",
            summary.total, summary.bajo, summary.medio, summary.suficiente
        );
        for row in &rows {
            println!(
                "- #{} {} • {} • stock {} / min {} • {}",
                row.product.id,
                row.product.name,
                row.product.warehouse_label.as_deref().unwrap_or("-"),
                row.product.stock,
                row.product.min_stock,
                row.status.label()
            );
        }
    }
    print_notices(&mut page.notices);
    Ok(())
}

async fn handle_dashboard<S: TokenStorage>(session: &mut Session<S>, json: bool) -> Result<()> {
    require(session, Route::Dashboard)?;
    let mut page = DashboardPage::new();
    page.load(session).await.context("failed to load data")?;
    let stats = page.stats().cloned().unwrap_or_default();

    if json {
        print_json(&stats)?;
    } else {
        println!("Total de productos: {}", format_number(stats.total_products));
        println!("Stock bajo: {}", format_number(stats.low_stock_products));
        println!("Total de usuarios: {}", format_number(stats.total_users));
        println!("Más entradas del mes:");
        for e in &stats.top_entries_month {
            println!("  - {} ({}) • {}", e.name, e.sku, format_number(e.total));
        }
        println!("Menos salidas del mes:");
        for e in &stats.low_exits_month {
            println!("  - {} ({}) • {}", e.name, e.sku, format_number(e.total));
        }
        println!("Alertas de stock:");
        for (p, status) in page.alerts() {
            println!("  - {} • stock {} / min {} • {}", p.display_label(), p.stock, p.min_stock, status.label());
        }
    }
    Ok(())
}

async fn handle_report<S: TokenStorage>(session: &mut Session<S>, args: ReportArgs) -> Result<()> {
    require(session, Route::Dashboard)?;
    let today = Utc::now().date_naive();
    let year = args.year.unwrap_or(today.year());
    let month = args.month.unwrap_or(today.month());
    let kind = match args.kind.as_str() {
        "inventory" => ReportKind::Inventory { year, month },
        "movements" => ReportKind::Movements { year, month },
        _ => ReportKind::LowStock,
    };
    let request = ReportRequest::new(kind, args.format)?
        .in_warehouse(WarehouseSelection::from(args.warehouse));

    let mut page = DashboardPage::new();
    let outcome = page.generate_report(session, &request, &args.out, today).await;
    print_notices(&mut page.notices);
    let path = outcome?;
    println!("{}", path.display());
    Ok(())
}

/// Ask the confirmation question on the terminal unless `yes` was given.
fn ask<Id: Copy>(confirmation: Confirmation<Id>, yes: bool) -> Result<Option<Confirmed<Id>>> {
    if yes {
        return Ok(Some(confirmation.accept()));
    }
    eprint!("{} [s/N] ", confirmation.prompt());
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(confirmation.answer(is_affirmative(&answer)))
}

/// Print notifications, then turn a submit failure into a CLI error.
fn finish<T>(result: Result<T, SubmitError>, notices: &mut Notices) -> Result<T> {
    print_notices(notices);
    result.map_err(submit_failure)
}

fn submit_failure(err: SubmitError) -> anyhow::Error {
    if let Some(fields) = err.field_errors() {
        for (field, message) in fields.iter() {
            eprintln!("  {field}: {message}");
        }
    }
    match err {
        SubmitError::Invalid(_) => anyhow!("the form has errors"),
        other => anyhow!(other),
    }
}

fn print_notices(notices: &mut Notices) {
    for Notification { level, message } in notices.drain() {
        let tag = match level {
            Level::Success => "ok",
            Level::Info => "info",
            Level::Error => "error",
        };
        eprintln!("[{tag}] {message}");
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
