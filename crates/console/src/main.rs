use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use console::shared::api::{ApiClient, ReqwestTransport, ResourceClient};
use console::shared::config::{get_log_dir, load_config};
use console::shared::logger;
use console::shared::notify::{CollectingNotifier, Notification};
use console::shared::state::ResourceList;
use console::system::session::Session;
use console::usecases::u501_resolve_branches::{AssociationResolver, BranchSelection};
use console::usecases::u502_upload_attachments::{AttachmentUploader, PendingAttachment};
use console::usecases::u504_composite_save::{CompositeSaver, SaveRequest};
use contracts::domain::a001_company::aggregate::Company;
use contracts::domain::a002_branch::aggregate::Branch;
use contracts::domain::a003_category::aggregate::Category;
use contracts::domain::a004_supply::aggregate::SupplyItem;
use contracts::domain::a005_product::aggregate::Product;
use contracts::domain::a006_promotion::aggregate::Promotion;
use contracts::domain::common::{PersistedResource, ResourceId, ResourceKind};
use contracts::enums::resource_type::ResourceType;

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Консоль администрирования ресторанной сети", long_about = None)]
struct Cli {
    /// Путь к config.toml (по умолчанию рядом с исполняемым файлом)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Токен доступа к API
    #[arg(long, env = "CONSOLE_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Филиал пользователя (перекрывает значение из конфигурации)
    #[arg(long, global = true)]
    branch: Option<ResourceId>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Филиалы компании, доступные для привязки
    Branches,

    /// Сохранить запись из JSON-формы
    Save {
        /// Вид записи: empresa, sucursal, categoria, insumo, manufacturado, promocion
        kind: String,

        /// JSON-файл формы
        form: PathBuf,

        /// Изображение для загрузки (до 3)
        #[arg(long = "image")]
        images: Vec<PathBuf>,

        /// Id редактируемой записи
        #[arg(long)]
        edit: Option<ResourceId>,
    },

    /// Удалить изображение записи
    DeleteImage {
        kind: String,
        parent_id: ResourceId,
        public_id: String,
        image_id: ResourceId,
    },
}

struct Context {
    api: ApiClient,
    session: Session,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, source) = load_config(cli.config.as_deref())?;
    logger::init(&get_log_dir(&config), &config.logging.filter)?;
    source.log();

    let mut session = Session::anonymous();
    if let Some(token) = cli.token {
        session = session.with_token(token);
    }
    if let Some(branch_id) = cli.branch.or(config.session.branch_id) {
        session = session.with_branch(branch_id);
    }

    let transport = ReqwestTransport::new(&config.api.base_url, config.api.timeout())?;
    let ctx = Context {
        api: ApiClient::new(Arc::new(transport)),
        session,
    };

    tracing::info!(base_url = %config.api.base_url, "console started");

    match cli.command {
        Commands::Branches => {
            list_branches(&ctx).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Save {
            kind,
            form,
            images,
            edit,
        } => match parse_kind(&kind)? {
            ResourceType::Company => save::<Company>(&ctx, &form, &images, edit).await,
            ResourceType::Branch => save::<Branch>(&ctx, &form, &images, edit).await,
            ResourceType::Category => save::<Category>(&ctx, &form, &images, edit).await,
            ResourceType::SupplyItem => save::<SupplyItem>(&ctx, &form, &images, edit).await,
            ResourceType::Product => save::<Product>(&ctx, &form, &images, edit).await,
            ResourceType::Promotion => save::<Promotion>(&ctx, &form, &images, edit).await,
        },
        Commands::DeleteImage {
            kind,
            parent_id,
            public_id,
            image_id,
        } => {
            let args = (parent_id, public_id.as_str(), image_id);
            match parse_kind(&kind)? {
                ResourceType::Company => delete_image::<Company>(&ctx, args).await,
                ResourceType::Branch => delete_image::<Branch>(&ctx, args).await,
                ResourceType::SupplyItem => delete_image::<SupplyItem>(&ctx, args).await,
                ResourceType::Product => delete_image::<Product>(&ctx, args).await,
                ResourceType::Promotion => delete_image::<Promotion>(&ctx, args).await,
                ResourceType::Category => {
                    anyhow::bail!("У категорий нет изображений")
                }
            }
        }
    }
}

fn parse_kind(code: &str) -> anyhow::Result<ResourceType> {
    ResourceType::from_code(code).ok_or_else(|| {
        let known: Vec<&str> = ResourceType::all().iter().map(|t| t.code()).collect();
        anyhow::anyhow!("Неизвестный вид записи '{}'. Допустимо: {}", code, known.join(", "))
    })
}

async fn list_branches(ctx: &Context) -> anyhow::Result<()> {
    let anchor_id = ctx
        .session
        .branch_id
        .ok_or_else(|| anyhow::anyhow!("Не задан филиал: укажите --branch или [session] branch_id"))?;

    let resolver = AssociationResolver::new(ResourceClient::new(ctx.api.clone()));
    let mut selection = BranchSelection::new();
    selection
        .load(&resolver, anchor_id, ctx.session.bearer())
        .await?;

    for branch in selection.options() {
        let marker = if branch.es_casa_matriz { "*" } else { " " };
        println!("{} {:>6}  {}", marker, branch.id, branch.nombre);
    }
    println!("Всего: {}", selection.options().len());
    Ok(())
}

async fn save<K>(
    ctx: &Context,
    form: &Path,
    images: &[PathBuf],
    edit: Option<ResourceId>,
) -> anyhow::Result<ExitCode>
where
    K: ResourceKind,
    K::CreateRequest: DeserializeOwned,
    K::UpdateRequest: DeserializeOwned,
{
    let contents = tokio::fs::read_to_string(form).await?;

    let mut attachments = Vec::with_capacity(images.len());
    for path in images {
        attachments.push(PendingAttachment::from_path(path).await?);
    }

    let request = match edit {
        Some(id) => SaveRequest::<K>::update(id, serde_json::from_str(&contents)?),
        None => SaveRequest::<K>::create(serde_json::from_str(&contents)?),
    }
    .with_attachments(attachments);

    let notifier = Arc::new(CollectingNotifier::new());
    let saver = CompositeSaver::<K>::new(ctx.api.clone(), notifier.clone());
    let list = ResourceList::<K>::new(ResourceClient::new(ctx.api.clone()), ctx.session.clone());

    let outcome = saver.save(&ctx.session, &request, Some(&list)).await;
    print_notifications(&notifier);

    // Сообщение об ошибке уже выведено уведомлением
    let Some(id) = outcome.id() else {
        return Ok(ExitCode::FAILURE);
    };
    println!("{}: {} записей в списке, сохранена №{}", K::list_name(), list.len(), id);
    Ok(ExitCode::SUCCESS)
}

async fn delete_image<K: ResourceKind>(
    ctx: &Context,
    (parent_id, public_id, image_id): (ResourceId, &str, ResourceId),
) -> anyhow::Result<ExitCode> {
    let client = ResourceClient::<K>::new(ctx.api.clone());
    let token = ctx.session.bearer();

    let parent = client.get_with(parent_id, token).await?;
    let mut images = parent.images().to_vec();

    let list = ResourceList::<K>::new(client.clone(), ctx.session.clone());
    if let Err(e) = AttachmentUploader::new(client)
        .delete(public_id, image_id, &mut images, Some(&list), token)
        .await
    {
        tracing::warn!(
            resource = K::collection_name(),
            image_id,
            error = %e,
            "image delete failed"
        );
        eprintln!("❌ {}", e);
        return Ok(ExitCode::FAILURE);
    }

    println!(
        "Изображение {} удалено из «{}», осталось {}",
        image_id,
        parent.denominacion(),
        images.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn print_notifications(notifier: &CollectingNotifier) {
    for notification in notifier.take() {
        match notification {
            Notification::Success(message) => println!("✅ {}", message),
            Notification::Error(message) => eprintln!("❌ {}", message),
        }
    }
}
