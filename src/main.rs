use anyhow::Result;
use clap::Parser;
use connection_counter::{
    counter_node::CounterNode,
    logging::{self, LogFormat},
    params::Params,
    runtime::{parse_param_assignment, Context, Node, ParameterValue},
};
use tokio::signal;
use tracing::info;

/// Runs one publisher, one subscription and a timer on the same topic and
/// logs how many peers each endpoint is connected to.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Node name. Distinct names let several instances run side by side.
    name: String,

    /// Namespace the node and its relative topics live in.
    #[arg(long, default_value = "/")]
    namespace: String,

    /// Node parameter, repeatable.
    #[arg(short = 'p', long = "param", value_name = "KEY:=VALUE", value_parser = parse_param_assignment)]
    params: Vec<(String, ParameterValue)>,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format);

    let ctx = Context::create();
    let node = Node::create(ctx.clone(), &cli.name, &cli.namespace)?;
    node.set_parameters(cli.params);
    let params = Params::load(&node)?;
    let counter = CounterNode::new(&node, &params)?;
    info!(node = %node.fully_qualified_name(), topic = %params.topic, "node started");

    tokio::select! {
        result = counter.run() => result?,
        result = signal::ctrl_c() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    ctx.shutdown();
    info!(node = %node.fully_qualified_name(), "node stopped");
    Ok(())
}
