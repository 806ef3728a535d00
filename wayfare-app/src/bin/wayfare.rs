use clap::{Parser, Subcommand};
use log::error;
use std::thread;
use std::time::Duration;
use wayfare_app::demo_graph;
use wayfare_app::session::{PollResponse, SearchRequest, SessionError, TerminationPolicy};
use wayfare_app::WayfareApp;
use wayfare_core::model::GraphManager;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the graphs the demo catalogue knows about.
    Graphs,
    /// List the registered search algorithms and heuristics.
    Algorithms,
    /// Run a search to completion and print its outcome.
    Search {
        /// Graph id, e.g. "denver"
        #[arg(short, long, default_value = "denver")]
        graph: String,
        /// Algorithm name, e.g. "astar", "ucs", "bidirectional"
        #[arg(short, long)]
        algorithm: String,
        /// Heuristic name, required by algorithms that need one
        #[arg(long)]
        heuristic: Option<String>,
        /// Start node id or label
        #[arg(long)]
        start: String,
        /// Goal node id or label
        #[arg(long)]
        goal: String,
        /// Cap the search to this many expansions before cancelling
        #[arg(long)]
        max_iterations: Option<u64>,
    },
    /// Run a D*-Lite session, then feed it one or more edge-cost updates
    /// and print the replanned route after each, all within the same
    /// live session.
    Replan {
        /// Graph id, e.g. "denver"
        #[arg(short, long, default_value = "denver")]
        graph: String,
        /// Heuristic name
        #[arg(long, default_value = "euclidean")]
        heuristic: String,
        /// Start node id or label
        #[arg(long)]
        start: String,
        /// Goal node id or label
        #[arg(long)]
        goal: String,
        /// An edge-cost update to apply, as "FROM:TO:COST"; repeatable,
        /// applied to the same session in order.
        #[arg(long = "edge", value_name = "FROM:TO:COST")]
        edges: Vec<String>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),
}

fn build_app() -> WayfareApp {
    let mut graphs = GraphManager::new();
    graphs.register(
        "denver",
        demo_graph::denver_sample(),
        "Downtown Denver sample",
        "Eight intersections with a freeway shortcut and a surface-street detour to the airport.",
    );
    WayfareApp::new(graphs)
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let app = build_app();

    match &args.command {
        Command::Graphs => {
            for (id, meta) in app.list_graphs() {
                println!(
                    "{id}: {} ({} nodes, {} edges)",
                    meta.display_name, meta.node_count, meta.edge_count
                );
            }
        }
        Command::Algorithms => {
            for d in wayfare_core::registry::AlgorithmRegistry::list() {
                let needs_h = if d.requires_heuristic { " (needs heuristic)" } else { "" };
                println!("{}: {}{needs_h}", d.name, d.description);
            }
            for h in wayfare_core::registry::HeuristicRegistry::list() {
                println!("heuristic {}: {}", h.name, h.description);
            }
        }
        Command::Search {
            graph,
            algorithm,
            heuristic,
            start,
            goal,
            max_iterations,
        } => {
            let policy = match max_iterations {
                Some(limit) => TerminationPolicy::IterationsLimit { limit: *limit },
                None => TerminationPolicy::Unbounded,
            };
            let request = SearchRequest {
                graph_id: graph.clone(),
                algorithm: algorithm.clone(),
                heuristic: heuristic.clone(),
                start_node: start.clone(),
                goal_node: goal.clone(),
            };
            let session_id = app.start_search(request, policy)?;
            let mut offset = 0;
            loop {
                let poll = app.sessions().poll(&session_id, offset)?;
                offset = poll.offset;
                for event in &poll.events {
                    println!("{}", serde_json::to_string(event).unwrap_or_default());
                }
                if poll.completed {
                    match (poll.solution_found, poll.solution_path, poll.solution_cost) {
                        (Some(true), Some(path), Some(cost)) => {
                            println!("solution: {} (cost {cost:.3}, {} expansions)", path.join(" -> "), poll.total_steps.unwrap_or(0));
                        }
                        _ => {
                            if let Some(err) = poll.error {
                                println!("search failed: {err}");
                            } else {
                                println!("no solution found ({} expansions)", poll.total_steps.unwrap_or(0));
                            }
                        }
                    }
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
        Command::Replan { graph, heuristic, start, goal, edges } => {
            let request = SearchRequest {
                graph_id: graph.clone(),
                algorithm: "dstar_lite".to_string(),
                heuristic: Some(heuristic.clone()),
                start_node: start.clone(),
                goal_node: goal.clone(),
            };
            let session_id = app.start_search(request, TerminationPolicy::Unbounded)?;

            let mut offset = 0;
            loop {
                let poll = app.sessions().poll(&session_id, offset)?;
                offset = poll.offset;
                if poll.completed {
                    println!("initial plan:");
                    print_plan(&poll);
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }

            for edge in edges {
                let Some((from, rest)) = edge.split_once(':') else {
                    error!("malformed edge update '{edge}', expected FROM:TO:COST");
                    continue;
                };
                let Some((to, cost)) = rest.split_once(':') else {
                    error!("malformed edge update '{edge}', expected FROM:TO:COST");
                    continue;
                };
                let Ok(cost) = cost.parse::<f64>() else {
                    error!("malformed cost in edge update '{edge}'");
                    continue;
                };
                app.update_edge_cost(&session_id, from, to, cost)?;
                let poll = app.sessions().poll(&session_id, offset)?;
                offset = poll.offset;
                println!("after {from} -> {to} = {cost}:");
                print_plan(&poll);
            }
        }
    }
    Ok(())
}

fn print_plan(poll: &PollResponse) {
    for event in &poll.events {
        println!("{}", serde_json::to_string(event).unwrap_or_default());
    }
    match (&poll.solution_path, poll.solution_cost) {
        (Some(path), Some(cost)) => println!("solution: {} (cost {cost:.3})", path.join(" -> ")),
        _ => println!("no solution"),
    }
}

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => {}
        Err(e) => error!("{e}"),
    }
}
