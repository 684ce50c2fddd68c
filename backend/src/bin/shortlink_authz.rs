//! Operator CLI for role assignments, feature toggles, and link resolution.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use shortlink_core::ShortlinkSettings;
use shortlink_core::domain::feature::{
    DecisionMakerFactory, FeatureId, FeaturePermissionTable, FeatureToggle, ToggleType,
};
use shortlink_core::domain::ports::{Authorizer, FeatureToggleRepository};
use shortlink_core::domain::rbac::{Permission, PermissionTable, RbacAuthorizer, Role};
use shortlink_core::domain::{Alias, ShortLinkRetriever, User, UserId};
use shortlink_core::outbound::TracingInstrumentation;
use shortlink_core::outbound::persistence::{
    DbPool, DieselFeatureToggleRepository, DieselShortLinkRepository, DieselUserRoleRepository,
    DieselUserShortLinkRepository, PoolConfig,
};

/// `shortlink-authz` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shortlink-authz",
    about = "Inspect and administer link-shortener authorization state",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `SHORTLINK_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Check whether a user holds a permission.
    HasPermission {
        #[arg(long)]
        user: String,
        #[arg(long, value_parser = parse_permission)]
        permission: Permission,
    },
    /// Evaluate a feature for a user, or for an anonymous caller.
    Feature {
        #[arg(long)]
        feature: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Resolve the link active under an alias.
    ActiveLink {
        #[arg(long)]
        alias: String,
        /// RFC 3339 reference time; defaults to now.
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<DateTime<Utc>>,
    },
    /// Assign a role to a user.
    GrantRole {
        #[arg(long)]
        user: String,
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },
    /// Revoke a role from a user.
    RevokeRole {
        #[arg(long)]
        user: String,
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },
    /// Switch a feature toggle on or off, creating it when a type is given.
    SetToggle {
        #[arg(long)]
        feature: String,
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: bool,
        #[arg(long = "toggle-type", value_parser = parse_toggle_type)]
        toggle_type: Option<ToggleType>,
    },
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ShortlinkSettings::load_from_iter([OsString::from("shortlink-authz")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let deployment = settings
        .deployment()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let database_url = resolve_database_url(args.database_url, settings.database_url())?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let roles = Arc::new(DieselUserRoleRepository::new(pool.clone()));
    let toggles = Arc::new(DieselFeatureToggleRepository::new(pool.clone()));
    let authorizer = Arc::new(
        RbacAuthorizer::new(roles, Arc::new(PermissionTable::standard()))
            .with_instrumentation(Arc::new(TracingInstrumentation)),
    );

    match args.command {
        Command::HasPermission { user, permission } => {
            let user_id = parse_user_id(&user)?;
            let granted = authorizer
                .has_permission(&user_id, permission)
                .await
                .map_err(domain_error)?;
            println!("user={user_id}");
            println!("permission={permission}");
            println!("granted={granted}");
        }
        Command::Feature { feature, user } => {
            let feature = parse_feature(&feature)?;
            let user = user
                .as_deref()
                .map(parse_user_id)
                .transpose()?
                .map(User::new);
            let factory = DecisionMakerFactory::new(
                deployment,
                authorizer,
                toggles,
                Arc::new(FeaturePermissionTable::standard()),
            );
            let decisions = factory.new_decision_maker(Arc::new(TracingInstrumentation));
            let enabled = decisions
                .is_feature_enabled(&feature, user.as_ref())
                .await
                .map_err(domain_error)?;
            println!("deployment={deployment}");
            println!("feature={feature}");
            println!("enabled={enabled}");
        }
        Command::ActiveLink { alias, at } => {
            let alias = Alias::new(alias.as_str())
                .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
            let at = at.unwrap_or_else(|| DefaultClock.utc());
            let retriever = ShortLinkRetriever::new(
                Arc::new(DieselShortLinkRepository::new(pool.clone())),
                Arc::new(DieselUserShortLinkRepository::new(pool)),
            );
            let link = retriever
                .get_active_short_link(&alias, at)
                .await
                .map_err(domain_error)?;
            println!("id={}", link.id());
            println!("alias={}", link.alias());
            println!("long_link={}", link.long_link());
            println!("created_at={}", link.created_at().to_rfc3339());
            if let Some(expire_at) = link.expire_at() {
                println!("expire_at={}", expire_at.to_rfc3339());
            }
        }
        Command::GrantRole { user, role } => {
            let user_id = parse_user_id(&user)?;
            authorizer
                .grant_role(&user_id, role)
                .await
                .map_err(domain_error)?;
            println!("granted {role} to {user_id}");
        }
        Command::RevokeRole { user, role } => {
            let user_id = parse_user_id(&user)?;
            authorizer
                .revoke_role(&user_id, role)
                .await
                .map_err(domain_error)?;
            println!("revoked {role} from {user_id}");
        }
        Command::SetToggle {
            feature,
            enabled,
            toggle_type,
        } => {
            let feature = parse_feature(&feature)?;
            let toggle = set_toggle(toggles.as_ref(), feature, enabled, toggle_type).await?;
            println!("feature={}", toggle.id);
            println!("enabled={}", toggle.is_enabled);
            println!("toggle_type={}", toggle.toggle_type);
        }
    }

    Ok(())
}

async fn set_toggle(
    toggles: &dyn FeatureToggleRepository,
    feature: FeatureId,
    enabled: bool,
    toggle_type: Option<ToggleType>,
) -> io::Result<FeatureToggle> {
    if let Some(toggle_type) = toggle_type {
        let toggle = FeatureToggle {
            id: feature,
            is_enabled: enabled,
            toggle_type,
        };
        toggles
            .save_toggle(&toggle)
            .await
            .map_err(|error| io::Error::other(error.to_string()))?;
        return Ok(toggle);
    }

    toggles
        .set_enabled(&feature, enabled)
        .await
        .map_err(|error| io::Error::other(error.to_string()))?
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("toggle {feature} does not exist; pass --toggle-type to create it"),
            )
        })
}

fn domain_error(error: shortlink_core::domain::Error) -> io::Error {
    let kind = match error.code() {
        shortlink_core::domain::ErrorCode::NotFound => io::ErrorKind::NotFound,
        shortlink_core::domain::ErrorCode::InvalidRequest => io::ErrorKind::InvalidInput,
        _ => io::ErrorKind::Other,
    };
    io::Error::new(kind, error)
}

fn parse_user_id(raw: &str) -> io::Result<UserId> {
    UserId::new(raw).map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))
}

fn parse_feature(raw: &str) -> io::Result<FeatureId> {
    FeatureId::new(raw).map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))
}

fn parse_permission(raw: &str) -> Result<Permission, String> {
    raw.parse().map_err(|error| format!("{error}"))
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse().map_err(|error| format!("{error}"))
}

fn parse_toggle_type(raw: &str) -> Result<ToggleType, String> {
    raw.parse().map_err(|error| format!("{error}"))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|error| format!("expected an RFC 3339 timestamp: {error}"))
}

fn resolve_database_url(explicit: Option<String>, configured: Option<&str>) -> io::Result<String> {
    let value = explicit
        .or_else(|| configured.map(str::to_owned))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "database URL missing: set --database-url or SHORTLINK_DATABASE_URL",
            )
        })?;
    if value.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL must not be empty",
        ));
    }
    Ok(value)
}
