//! Networking and TCP console task.
//!
//! Manages WiFi connection, listens for TCP commands, parses them, forwards them
//! to the tutorial task and writes its replies back to the client.
//!
//! Handles network errors and reconnection logic.
extern crate alloc;

use super::{TUTORIAL_COMMANDS, TUTORIAL_REPLIES};
use crate::robot::commands::TutorialCommand;
use crate::tutorial::console::Reply;
use alloc::string::String;
use anyhow::anyhow;
use embassy_net::{tcp::TcpSocket, IpListenEndpoint, Stack};
use embassy_time::Timer;
use embedded_io_async::Write;
use esp_wifi::wifi::{ClientConfiguration, WifiController, WifiDevice};
use log::{error, info, warn};

pub const PORT: u16 = 1234;
pub const RX_BUF_SIZE: usize = 256;
pub const TX_BUF_SIZE: usize = 2048;

const WELCOME: &str = "Tutorial de marcha: init [cm] | current | exec | next | reset | state | quit\n";

#[embassy_executor::task]
pub async fn runner_task(mut runner: embassy_net::Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

#[embassy_executor::task]
pub async fn net_task(stack: Stack<'static>) {
    let mut rx_buf = [0u8; RX_BUF_SIZE];
    let mut tx_buf = [0u8; TX_BUF_SIZE];

    while !stack.is_link_up() {
        Timer::after_millis(500).await;
    }
    stack.wait_config_up().await;

    if let Some(config) = stack.config_v4() {
        info!(
            "TCP console listening at address {}:{}",
            config.address, PORT
        );
    }

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buf, &mut tx_buf);

        match socket
            .accept(IpListenEndpoint {
                port: PORT,
                addr: None,
            })
            .await
        {
            Ok(_) => {
                info!("Client connected!");
                handle_connection(&mut socket).await;
                socket.close();
                let _ = socket.flush().await;
            }
            Err(e) => {
                error!("Accept failed: {:?}", e);
                Timer::after_millis(500).await; // Backoff delay
                continue;
            }
        }
    }
}

pub async fn handle_connection(socket: &mut TcpSocket<'_>) {
    let mut rx_buf = [0u8; RX_BUF_SIZE];
    if let Err(e) = socket.write_all(WELCOME.as_bytes()).await {
        error!("Write error: {:?}", e);
        return;
    }

    loop {
        match socket.read(&mut rx_buf).await {
            Ok(0) => break,
            Ok(n) => {
                let received_str = core::str::from_utf8(&rx_buf[..n])
                    .unwrap_or_default()
                    .trim();
                let reply = match TutorialCommand::try_from(received_str) {
                    Ok(TutorialCommand::CloseConnection) => break, // special case
                    Ok(cmd) => {
                        TUTORIAL_COMMANDS.send(cmd).await;
                        TUTORIAL_REPLIES.receive().await
                    }
                    Err(_) => {
                        warn!("Unrecognised command: {}", received_str);
                        let mut reply = Reply::new();
                        let _ = reply.push_str("Comando desconocido\n");
                        reply
                    }
                };
                if let Err(e) = socket.write_all(reply.as_bytes()).await {
                    error!("Write error: {:?}", e);
                    break;
                }
            }
            Err(e) => {
                error!("Read error: {:?}", e);
                break;
            }
        }
    }
}

pub async fn configurate_and_start_wifi(
    wifi_controller: &mut WifiController<'_>,
) -> anyhow::Result<()> {
    let ssid = env!("WIFI_SSID");
    let password = env!("WIFI_PASS");
    let config = esp_wifi::wifi::Configuration::Client(ClientConfiguration {
        ssid: String::from(ssid),
        password: String::from(password),
        ..Default::default()
    });

    info!("Connecting to wifi: {ssid}");
    wifi_controller
        .set_configuration(&config)
        .map_err(|e| anyhow!("fail setting configuration of wifi controller: {e:?}"))?;

    wifi_controller
        .set_power_saving(esp_wifi::config::PowerSaveMode::None)
        .map_err(|e| anyhow!("fail setting wifi power mode: {e:?}"))?;

    wifi_controller
        .start()
        .map_err(|e| anyhow!("fail starting wifi: {e:?}"))?;
    wifi_controller
        .connect_async()
        .await
        .map_err(|e| anyhow!("An error occured trying to connect to wifi: {e:?}"))?;

    if let Ok(rssi) = wifi_controller.rssi() {
        info!("Wifi connected! signal: {}", rssi)
    }
    Ok(())
}
