use futures::executor::block_on;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use style_lifecycle::core::{
    AppConfig, ConfigManagerOperations, CoreConfigManager, load_config_from_path,
};
use style_lifecycle::lifecycle::{LifecycleResult, MAP_SERVICE, ServiceBag};
use style_lifecycle::logging;
use style_lifecycle::styles::{StyleDefinition, StyleNode};

const APP_NAME: &str = "StyleLifecycleDemo";

// Stand-in for the map an enclosing map component would provide.
#[derive(Debug)]
struct DemoMap {
    name: &'static str,
}

fn load_config() -> AppConfig {
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        match load_config_from_path(&path) {
            Ok(config) => return config,
            Err(e) => eprintln!("Could not read configuration {}: {e}", path.display()),
        }
    }
    match CoreConfigManager::new().load_config(APP_NAME) {
        Ok(Some(config)) => config,
        Ok(None) => AppConfig::default(),
        Err(e) => {
            eprintln!("Could not load stored configuration, using defaults: {e}");
            AppConfig::default()
        }
    }
}

fn print_styles(stage: &str, nodes: &[Box<dyn StyleNode>]) {
    println!("--- {stage} ---");
    for node in nodes {
        match node.describe_style() {
            Some(style) => println!("{} [{:?}]: {style}", node.name(), node.state()),
            None => println!("{} [{:?}]: <no style>", node.name(), node.state()),
        }
    }
}

fn run(config: &AppConfig) -> LifecycleResult<()> {
    let root_services = ServiceBag::new().with_value(MAP_SERVICE, Rc::new(DemoMap { name: "demo" }));
    let mut nodes: Vec<Box<dyn StyleNode>> =
        config.styles.iter().map(StyleDefinition::instantiate).collect();
    log::info!("Demo: driving {} style components", nodes.len());

    for node in nodes.iter_mut() {
        node.inject_services(root_services.clone());
        block_on(node.init())?;
        node.mount()?;
        node.wait_pending()?;
    }
    print_styles("mounted", &nodes);

    for node in nodes.iter_mut() {
        node.refresh()?;
        node.wait_pending()?;
    }
    print_styles("refreshed", &nodes);

    if let Some(first) = nodes.first() {
        let map_name = first
            .services()
            .get::<DemoMap>(MAP_SERVICE)
            .map(|map| map.name);
        log::debug!("Demo: first component sees map {map_name:?}");
    }

    for node in nodes.iter_mut() {
        node.deinit()?;
    }
    print_styles("deinitialized", &nodes);
    Ok(())
}

fn main() -> ExitCode {
    let config = load_config();
    if let Err(e) = logging::init_logging(config.level_filter(), config.log_file.as_deref()) {
        eprintln!("Logging disabled: {e}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Demo: style lifecycle failed: {e}");
            ExitCode::FAILURE
        }
    }
}
