// ABOUTME: Entry point for the converge CLI application.
// ABOUTME: Parses arguments, loads config, and dispatches to the manager or image pipeline.

mod cli;

use clap::Parser;
use cli::{BuildArgs, Cli, Commands, ImageCommand, ListenerCommand, LoadBalancerCommand};
use converge::build::{BuildRequest, ImagePipeline};
use converge::client::{LbaasClient, LoadBalancerRequest, ListenerRequest};
use converge::config::{self, Config};
use converge::error::{Error, Result};
use converge::manager::PollingManager;
use converge::neutron::NeutronClient;
use converge::poll::interval_from_secs;
use converge::types::{ListenerId, LoadBalancerId};
use serde::Serialize;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Init {
        endpoint,
        registry,
        force,
    } = &cli.command
    {
        let cwd = env::current_dir()?;
        config::init_config(&cwd, endpoint.as_deref(), registry.as_deref(), *force)?;
        println!("Created {}", config::CONFIG_FILENAME);
        return Ok(());
    }

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Loadbalancer(command) => loadbalancer(&manager(&config)?, command).await,
        Commands::Listener(command) => listener(&manager(&config)?, command).await,
        Commands::Image(ImageCommand::Build(args)) => build_image(&config, args).await,
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(&env::current_dir()?)?,
    };

    let interval = cli
        .interval
        .map(interval_from_secs)
        .transpose()
        .map_err(|e| Error::InvalidConfig(e.to_string()))?;

    Ok(config.with_poll_overrides(interval, cli.max_attempts))
}

fn manager(config: &Config) -> Result<PollingManager<NeutronClient>> {
    let client = NeutronClient::from_config(config.neutron()?)?;
    Ok(PollingManager::new(client, config.poller()?))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn loadbalancer<C: LbaasClient>(
    manager: &PollingManager<C>,
    command: LoadBalancerCommand,
) -> Result<()> {
    match command {
        LoadBalancerCommand::Create {
            subnet,
            name,
            description,
        } => {
            let request = LoadBalancerRequest {
                vip_subnet_id: subnet,
                name,
                description,
                ..Default::default()
            };
            eprintln!("  → Creating load balancer...");
            let lb = manager.create_loadbalancer(&request).await?;
            eprintln!("  ✓ {} is {}", lb.id, lb.provisioning_status);
            print_json(&lb)
        }
        LoadBalancerCommand::Show { id } => {
            let lb = manager
                .client()
                .show_loadbalancer(&LoadBalancerId::new(id))
                .await?;
            print_json(&lb)
        }
        LoadBalancerCommand::List => print_json(&manager.client().list_loadbalancers().await?),
        LoadBalancerCommand::Delete { id } => {
            let id = LoadBalancerId::new(id);
            eprintln!("  → Deleting load balancer {id}...");
            manager.delete_loadbalancer(&id).await?;
            eprintln!("  ✓ {id} deleted");
            Ok(())
        }
        LoadBalancerCommand::DeleteAll => {
            eprintln!("  → Deleting all load balancers...");
            manager.delete_all_loadbalancers().await?;
            eprintln!("  ✓ No load balancers remain");
            Ok(())
        }
    }
}

async fn listener<C: LbaasClient>(
    manager: &PollingManager<C>,
    command: ListenerCommand,
) -> Result<()> {
    match command {
        ListenerCommand::Create {
            loadbalancer,
            protocol,
            port,
            name,
        } => {
            let request = ListenerRequest {
                loadbalancer_id: LoadBalancerId::new(loadbalancer),
                protocol,
                protocol_port: port,
                name,
                description: None,
                admin_state_up: None,
            };
            eprintln!("  → Creating listener...");
            let listener = manager.create_listener(&request).await?;
            eprintln!("  ✓ {} is listed", listener.id);
            print_json(&listener)
        }
        ListenerCommand::List => print_json(&manager.client().list_listeners().await?),
        ListenerCommand::Delete { id } => {
            let id = ListenerId::new(id);
            eprintln!("  → Deleting listener {id}...");
            manager.delete_listener(&id).await?;
            eprintln!("  ✓ {id} deleted");
            Ok(())
        }
        ListenerCommand::DeleteAll => {
            eprintln!("  → Deleting all listeners...");
            manager.delete_all_listeners().await?;
            eprintln!("  ✓ No listeners remain");
            Ok(())
        }
    }
}

async fn build_image(config: &Config, args: BuildArgs) -> Result<()> {
    let mut build_config = config.build()?.clone();
    if args.no_publish {
        build_config.publish = false;
    }
    if args.stream {
        build_config.stream_output = true;
    }

    let request = BuildRequest::new(
        &args.test_type,
        &args.project,
        &args.branch,
        chrono::Utc::now(),
    )?;
    let pipeline = ImagePipeline::new(build_config);

    eprintln!("  → Building {}...", pipeline.image(&request));
    let outcome = pipeline.run(&request).await?;

    for tag in &outcome.tags {
        println!("{tag}");
    }
    if outcome.published {
        eprintln!("  ✓ Published {} tag(s)", outcome.tags.len());
    } else {
        eprintln!("  ✓ Built {} tag(s), not published", outcome.tags.len());
    }
    Ok(())
}
