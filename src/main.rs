use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::bounded;
use dotenv::dotenv;
use log::{error, info, warn};

use shake_dice::config::ConfigManager;
use shake_dice::dice::DieRoller;
use shake_dice::logger;
use shake_dice::mqtt::run_mqtt_client;
use shake_dice::replay::run_replay;
use shake_dice::source::InputSource;
use shake_dice::ShakeDiceApp;

const DEFAULT_CONFIG_PATH: &str = "shake-dice.toml";

fn main() {
    dotenv().ok(); // 加载 .env 文件
    logger::init_logger();
    info!("Application starting");

    let config_path = env::var("SHAKE_DICE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let config = match ConfigManager::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    let source = match env::var("SHAKE_DICE_SOURCE") {
        Ok(value) => match value.parse::<InputSource>() {
            Ok(source) => source,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        Err(_) => InputSource::default(),
    };

    let roller = match env::var("SHAKE_DICE_SEED").ok().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => {
            info!("Using seeded die roller ({})", seed);
            DieRoller::with_seed(seed)
        }
        Some(Err(e)) => {
            warn!("Ignoring invalid SHAKE_DICE_SEED: {}", e);
            DieRoller::new()
        }
        None => DieRoller::new(),
    };

    let (input_sender, input_receiver) = bounded(config.get_config().channels.data_channel_capacity);
    let shutdown_signal = Arc::new(AtomicBool::new(false));

    let input_shutdown = Arc::clone(&shutdown_signal);
    let mqtt_config = config.get_config().mqtt.clone();
    info!("Reading accelerometer events from {:?}", source);
    let input_handle = thread::spawn(move || match source {
        InputSource::Mqtt => {
            if let Err(e) = run_mqtt_client(mqtt_config, input_sender, input_shutdown) {
                error!("MQTT thread failed: {}", e);
            }
        }
        InputSource::Stdin => {
            let stdin = io::stdin();
            match run_replay(stdin.lock(), input_sender, input_shutdown) {
                Ok(count) => info!("Stdin closed after {} events", count),
                Err(e) => error!("Stdin replay failed: {}", e),
            }
        }
        InputSource::File(path) => {
            let result = File::open(&path)
                .map_err(Into::into)
                .and_then(|file| run_replay(BufReader::new(file), input_sender, input_shutdown));
            match result {
                Ok(count) => info!("Replayed {} events from {}", count, path.display()),
                Err(e) => error!("Replay of {} failed: {}", path.display(), e),
            }
        }
    });

    let mut app = ShakeDiceApp::new(input_receiver, config, roller, Arc::clone(&shutdown_signal));
    let summary = app.run(|face, _trigger| {
        println!("{} {}", face, face.asset_name());
    });
    if app.is_shutting_down() {
        info!("Quit received, waiting for input thread");
    }

    // 关闭接收端，阻塞在 send 上的输入线程随之退出
    drop(app);
    shutdown_signal.store(true, Ordering::Relaxed);
    match input_handle.join() {
        Ok(()) => info!("Input thread shut down gracefully"),
        Err(e) => error!("Input thread panicked: {:?}", e),
    }

    info!(
        "Session: {} samples ({} ignored), {} shakes, {} rolls, faces {:?}",
        summary.samples_seen, summary.samples_ignored, summary.shakes, summary.rolls, summary.face_counts
    );
}
