use catpoint_security::config::Config;
use catpoint_security::error::{Result, SecurityError};
use catpoint_security::image::{CameraImage, FakeImageClassifier, ImageClassifier};
use catpoint_security::repository::JsonFileRepository;
use catpoint_security::security::{AlarmController, ArmingStatus, LoggingListener, StatusListener};
use catpoint_security::sensors::{Sensor, SensorType};
use clap::{Parser, Subcommand};
use log::{info, warn};
use parking_lot::Mutex;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

#[derive(Parser)]
#[command(name = "catpoint", version, about = "Home security alarm control")]
struct Cli {
    /// JSON file holding sensors and statuses
    #[arg(long, global = true, env = "CATPOINT_DATA_PATH")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show arming status, alarm status and sensors
    Status,
    /// Set the arming status (disarmed, armed-home, armed-away)
    Arm { status: ArmingStatus },
    /// List sensors
    Sensors,
    /// Add a sensor (door, window, motion)
    AddSensor {
        name: String,
        sensor_type: SensorType,
    },
    /// Remove a sensor by name
    RemoveSensor { name: String },
    /// Mark a sensor as active
    Activate { name: String },
    /// Mark a sensor as inactive
    Deactivate { name: String },
    /// Run one camera frame through cat detection
    ///
    /// A cat seen while disarmed is remembered only for the life of the
    /// process, so a later `arm` call starts without it. Use `monitor` to
    /// see that rule in action.
    Scan {
        /// Image file to scan (not decoded, passed to the classifier as-is)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Force the classifier to report a cat
        #[arg(long, conflicts_with = "no_cat")]
        cat: bool,
        /// Force the classifier to report no cat
        #[arg(long)]
        no_cat: bool,
    },
    /// Feed synthetic camera frames until Ctrl+C
    ///
    /// Arming commands (disarmed, armed-home, armed-away) can be typed on
    /// stdin while monitoring.
    Monitor {
        /// Seconds between frames
        #[arg(long)]
        interval: Option<u64>,
    },
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[tokio::main]
async fn main() {
    init_logger();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(path) = cli.data.clone() {
        config.storage.path = path;
    }

    if let Err(e) = run(cli.command, config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn build_controller(
    repository: Arc<JsonFileRepository>,
    classifier: Arc<dyn ImageClassifier>,
    listener: &Arc<dyn StatusListener>,
) -> AlarmController {
    let mut controller = AlarmController::new(repository, classifier);
    controller.restore();
    controller.add_status_listener(listener);
    controller
}

/// Parse one line typed while monitoring. Blank lines yield `None`.
fn parse_console_line(
    line: &str,
) -> Option<std::result::Result<ArmingStatus, strum::ParseError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(line.to_ascii_lowercase().parse())
}

fn find_sensor(controller: &AlarmController, name: &str) -> Result<Sensor> {
    controller
        .sensors()
        .into_iter()
        .find(|s| s.name() == name)
        .ok_or_else(|| SecurityError::UnknownSensor(name.to_string()))
}

fn print_status(controller: &AlarmController) {
    let arming = controller.arming_status();
    let alarm = controller.alarm_status();
    println!("Arming: {} ({})", arming.description(), arming);
    println!("Alarm:  {} ({})", alarm.description(), alarm);
    print_sensors(controller);
}

fn print_sensors(controller: &AlarmController) {
    let sensors = controller.sensors();
    if sensors.is_empty() {
        println!("No sensors");
        return;
    }
    for sensor in sensors {
        println!(
            "  {:<20} {:<7} {}",
            sensor.name(),
            sensor.sensor_type(),
            if sensor.is_active() { "Active" } else { "Inactive" }
        );
    }
}

async fn run(command: Command, config: Config) -> Result<()> {
    let listener: Arc<dyn StatusListener> = Arc::new(LoggingListener);

    let classifier: Arc<dyn ImageClassifier> = match &command {
        Command::Scan { cat: true, .. } => Arc::new(FakeImageClassifier::with_verdict(true)),
        Command::Scan { no_cat: true, .. } => Arc::new(FakeImageClassifier::with_verdict(false)),
        _ => Arc::new(FakeImageClassifier::new(config.camera.cat_probability)),
    };
    let repository = Arc::new(JsonFileRepository::open(&config.storage.path));
    info!("Using state file {:?}", repository.path());
    let mut controller = build_controller(repository.clone(), classifier, &listener);

    match command {
        Command::Status => print_status(&controller),
        Command::Sensors => print_sensors(&controller),
        Command::Arm { status } => {
            controller.set_arming_status(status);
            print_status(&controller);
        }
        Command::AddSensor { name, sensor_type } => {
            if controller.sensors().iter().any(|s| s.name() == name) {
                return Err(SecurityError::DuplicateSensor(name));
            }
            controller.add_sensor(Sensor::new(name, sensor_type));
            print_sensors(&controller);
        }
        Command::RemoveSensor { name } => {
            let sensor = find_sensor(&controller, &name)?;
            controller.remove_sensor(&sensor);
            print_sensors(&controller);
        }
        Command::Activate { name } => {
            let mut sensor = find_sensor(&controller, &name)?;
            controller.change_sensor_activation_status(&mut sensor, true);
            print_status(&controller);
        }
        Command::Deactivate { name } => {
            let mut sensor = find_sensor(&controller, &name)?;
            controller.change_sensor_activation_status(&mut sensor, false);
            print_status(&controller);
        }
        Command::Scan { file, .. } => {
            let image = match file {
                Some(path) => CameraImage::from_file(&path)?,
                None => CameraImage::new(vec![0; 64]).with_source("synthetic"),
            };
            if image.is_empty() {
                warn!("Camera image is empty");
            }
            controller.process_image(&image);
            print_status(&controller);
        }
        Command::Monitor { interval } => {
            let secs = interval.unwrap_or(config.camera.monitor_interval_secs).max(1);
            monitor(controller, secs).await;
        }
    }

    repository.flush()
}

async fn monitor(controller: AlarmController, secs: u64) {
    let controller = Arc::new(Mutex::new(controller));
    info!("Monitoring camera every {}s, press Ctrl+C to exit", secs);

    let camera = controller.clone();
    let camera_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(secs));
        let mut frame: u64 = 0;
        loop {
            interval.tick().await;
            frame += 1;
            let image = CameraImage::new(vec![0; 64]).with_source(format!("frame-{}", frame));
            camera.lock().process_image(&image);
        }
    });

    // Blocking stdin reads cannot be cancelled, so the console gets its own
    // thread that simply dies with the process.
    let console = controller.clone();
    let console_thread = std::thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match parse_console_line(&line) {
                    Some(Ok(status)) => console.lock().set_arming_status(status),
                    Some(Err(_)) => warn!(
                        "Unknown command {:?}, expected disarmed, armed-home or armed-away",
                        line.trim()
                    ),
                    None => {}
                }
            }
        });
    if let Err(e) = console_thread {
        warn!("Console input unavailable: {}", e);
    }

    match signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => log::error!("Failed to listen for shutdown signal: {}", e),
    }

    camera_task.abort();
    let controller = controller.lock();
    info!(
        "Final state: {}, {}",
        controller.arming_status().description(),
        controller.alarm_status().description()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use catpoint_security::security::AlarmStatus;

    #[test]
    fn test_console_line_parses_arming_status() {
        assert_eq!(
            parse_console_line("  Armed-Home\n").unwrap().unwrap(),
            ArmingStatus::ArmedHome
        );
        assert_eq!(
            parse_console_line("disarmed").unwrap().unwrap(),
            ArmingStatus::Disarmed
        );
        assert!(parse_console_line("open sesame").unwrap().is_err());
        assert!(parse_console_line("   ").is_none());
    }

    #[test]
    fn test_monitor_session_raises_alarm_for_cat_seen_before_arming() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(JsonFileRepository::open(dir.path().join("state.json")));
        let listener: Arc<dyn StatusListener> = Arc::new(LoggingListener);
        let classifier: Arc<dyn ImageClassifier> =
            Arc::new(FakeImageClassifier::with_verdict(true));
        let mut controller = build_controller(repository.clone(), classifier, &listener);

        controller.process_image(&CameraImage::new(vec![1; 8]));
        assert_eq!(controller.alarm_status(), AlarmStatus::NoAlarm);

        let status = parse_console_line("armed-away").unwrap().unwrap();
        controller.set_arming_status(status);
        assert_eq!(controller.alarm_status(), AlarmStatus::Alarm);
        assert!(repository.flush().is_ok());
    }
}
