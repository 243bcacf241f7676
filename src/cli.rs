// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "converge")]
#[command(about = "Drive OpenStack load balancers to a target state and build test runner images")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (default: discover converge.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seconds to wait between observations, e.g. 0.4
    #[arg(long, global = true)]
    pub interval: Option<f64>,

    /// Retries after the first observation before giving up
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new converge.yml configuration file
    Init {
        /// Neutron endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Registry prefix for runner images
        #[arg(long)]
        registry: Option<String>,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Load balancer operations that wait for convergence
    #[command(subcommand)]
    Loadbalancer(LoadBalancerCommand),

    /// Listener operations that wait for convergence
    #[command(subcommand)]
    Listener(ListenerCommand),

    /// Test runner image operations
    #[command(subcommand)]
    Image(ImageCommand),
}

#[derive(Subcommand)]
pub enum LoadBalancerCommand {
    /// Create a load balancer and wait until it is ACTIVE
    Create {
        /// Subnet to allocate the VIP from
        #[arg(long)]
        subnet: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Show a load balancer without waiting
    Show { id: String },

    /// List load balancers
    List,

    /// Delete a load balancer and wait until it is gone
    Delete { id: String },

    /// Delete every load balancer and wait until none remain
    DeleteAll,
}

#[derive(Subcommand)]
pub enum ListenerCommand {
    /// Create a listener and wait until it is listed
    Create {
        #[arg(long)]
        loadbalancer: String,

        #[arg(long, default_value = "HTTP")]
        protocol: String,

        #[arg(long)]
        port: u16,

        #[arg(long)]
        name: Option<String>,
    },

    /// List listeners
    List,

    /// Delete a listener and wait until it is no longer listed
    Delete { id: String },

    /// Delete every listener and wait until none remain
    DeleteAll,
}

#[derive(Subcommand)]
pub enum ImageCommand {
    /// Render the Dockerfile, build, and publish a runner image
    Build(BuildArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Test category, e.g. functional
    pub test_type: String,

    /// Project the runner image is for
    pub project: String,

    /// Branch passed to the template
    pub branch: String,

    /// Build and tag without pushing
    #[arg(long)]
    pub no_publish: bool,

    /// Stream build tool output instead of capturing it
    #[arg(long)]
    pub stream: bool,
}
