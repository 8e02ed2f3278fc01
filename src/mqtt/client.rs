use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{error, info, warn};
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};

use crate::config::MqttConfig;
use crate::types::{DataPoint, InputEvent};

pub fn run_mqtt_client(
    config: MqttConfig,
    input_sender: Sender<InputEvent>,
    shutdown_signal: Arc<AtomicBool>
) -> Result<(), Box<dyn std::error::Error>> {
    let mqtt_host = env::var("MQTT_HOST").unwrap_or_else(|_| config.broker.clone());
    let mqtt_port = match env::var("MQTT_PORT") {
        Ok(port) => port.parse::<u16>()?,
        Err(_) => config.port,
    };

    let mut mqtt_options = MqttOptions::new(
        config.client_id.clone(),
        mqtt_host,
        mqtt_port
    );

    if let (Ok(mqtt_user), Ok(mqtt_pass)) = (env::var("MQTT_USER"), env::var("MQTT_PASS")) {
        mqtt_options.set_credentials(mqtt_user, mqtt_pass);
    }

    mqtt_options.set_keep_alive(Duration::from_secs(config.keep_alive as u64));

    let (client, mut connection) = Client::new(mqtt_options, 10);
    client.subscribe(config.topics.accelerometer.as_str(), QoS::AtMostOnce)?;
    client.subscribe(config.topics.roll.as_str(), QoS::AtLeastOnce)?;
    client.subscribe(config.topics.control.as_str(), QoS::AtLeastOnce)?;
    info!(
        "Subscribed to {}, {} and {}",
        config.topics.accelerometer, config.topics.roll, config.topics.control
    );

    for event in connection.iter() {
        // 处理线程收到 quit 后置位；keep-alive 保证这里定期被检查
        if shutdown_signal.load(Ordering::Relaxed) {
            info!("MQTT thread received shutdown signal, exiting gracefully");
            break;
        }

        let input = match event {
            Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == config.topics.accelerometer => {
                match parse_sensor_data(&publish.payload) {
                    Ok(sample) => InputEvent::Sample(sample),
                    Err(e) => {
                        warn!("Invalid sensor data: {}", e);
                        continue;
                    }
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == config.topics.roll => {
                InputEvent::ManualRoll
            }
            Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == config.topics.control => {
                match parse_control(&publish.payload) {
                    Some(event) => event,
                    None => {
                        warn!("Unknown control command: {:?}", String::from_utf8_lossy(&publish.payload));
                        continue;
                    }
                }
            }
            Ok(_) => continue,
            Err(e) => {
                error!("MQTT connection error: {}", e);
                return Err(e.into());
            }
        };

        if input_sender.send(input).is_err() {
            // 通道断开表示处理线程已退出
            info!("Input channel disconnected, MQTT thread exiting");
            break;
        }
    }

    Ok(())
}

pub(crate) fn parse_control(payload: &[u8]) -> Option<InputEvent> {
    let command = std::str::from_utf8(payload).ok()?.trim();
    command.eq_ignore_ascii_case("quit").then_some(InputEvent::Shutdown)
}

/// Empty or `null` payloads are sensor events with no reading.
pub(crate) fn parse_sensor_data(payload: &[u8]) -> Result<Option<DataPoint>, String> {
    let payload_str = std::str::from_utf8(payload)
        .map_err(|e| format!("Invalid UTF-8: {}", e))?;

    if payload_str.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str::<Option<DataPoint>>(payload_str)
        .map_err(|e| format!("JSON parsing error: {}", e))
}
