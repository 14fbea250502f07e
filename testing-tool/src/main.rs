use colored::*;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::io::{self, Write};

type ToolResult<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() -> ToolResult<()> {
    println!("{}", "🚚 FleetLink Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::var("FLEETLINK_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
    println!("{} {}", "🌐 API:".bright_blue(), base_url);

    let client = Client::new();

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚛 Listar vehículos");
        println!("2. ➕ Registrar vehículo");
        println!("3. 🔍 Buscar vehículos disponibles");
        println!("4. 📅 Crear reserva");
        println!("5. 📋 Listar reservas");
        println!("6. 🗑️  Eliminar reserva");
        println!("7. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-7): ")?;

        let outcome = match choice.as_str() {
            "1" => call(&client, Method::GET, &format!("{}/api/vehicles", base_url), None).await,
            "2" => add_vehicle(&client, &base_url).await,
            "3" => search_available(&client, &base_url).await,
            "4" => create_booking(&client, &base_url).await,
            "5" => call(&client, Method::GET, &format!("{}/api/bookings", base_url), None).await,
            "6" => {
                let id = prompt("ID de la reserva: ")?;
                call(&client, Method::DELETE, &format!("{}/api/bookings/{}", base_url, id), None).await
            }
            "7" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{} {}", "❌ Error:".bright_red().bold(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> ToolResult<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

async fn add_vehicle(client: &Client, base_url: &str) -> ToolResult<()> {
    let name = prompt("Nombre: ")?;
    let capacity: f64 = prompt("Capacidad (kg): ")?.parse()?;
    let tyres: i32 = prompt("Neumáticos: ")?.parse()?;
    let route: Vec<String> = prompt("Ruta (pincodes separados por coma): ")?
        .split(',')
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .collect();
    let vehicle_no = prompt("Matrícula: ")?;

    let payload = json!({
        "name": name,
        "capacityKg": capacity,
        "tyres": tyres,
        "route": route,
        "available": true,
        "vehicleNo": vehicle_no
    });

    call(client, Method::POST, &format!("{}/api/vehicles", base_url), Some(payload)).await
}

async fn search_available(client: &Client, base_url: &str) -> ToolResult<()> {
    let capacity = prompt("Capacidad requerida (kg): ")?;
    let from = prompt("Pincode origen: ")?;
    let to = prompt("Pincode destino: ")?;
    let start = prompt("Inicio (ej: 2023-10-27T10:00:00Z): ")?;

    let response = client
        .get(format!("{}/api/vehicles/available", base_url))
        .query(&[
            ("capacityRequired", capacity.as_str()),
            ("fromPincode", from.as_str()),
            ("toPincode", to.as_str()),
            ("startTime", start.as_str()),
        ])
        .send()
        .await?;

    print_response(response).await
}

async fn create_booking(client: &Client, base_url: &str) -> ToolResult<()> {
    let payload = json!({
        "vehicleId": prompt("ID del vehículo: ")?,
        "customerId": prompt("ID del cliente: ")?,
        "fromPincode": prompt("Pincode origen: ")?,
        "toPincode": prompt("Pincode destino: ")?,
        "startTime": prompt("Inicio (ej: 2023-10-27T10:00:00Z): ")?
    });

    call(client, Method::POST, &format!("{}/api/bookings", base_url), Some(payload)).await
}

async fn call(client: &Client, method: Method, url: &str, payload: Option<Value>) -> ToolResult<()> {
    println!();
    println!("{} {} {}", "📤".bright_blue(), method, url);
    if let Some(body) = &payload {
        println!("{}", serde_json::to_string_pretty(body)?);
    }

    let mut request = client.request(method, url);
    if let Some(body) = &payload {
        request = request.json(body);
    }

    print_response(request.send().await?).await
}

async fn print_response(response: reqwest::Response) -> ToolResult<()> {
    let status = response.status();
    let body = response.text().await?;

    let status_line = format!("📥 HTTP {}", status);
    if status.is_success() {
        println!("{}", status_line.bright_green().bold());
    } else {
        println!("{}", status_line.bright_red().bold());
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(json) => {
            if let Some(items) = json.as_array() {
                println!("{}", format!("📦 {} elementos", items.len()).bright_green());
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Err(_) => println!("{}", body),
    }

    Ok(())
}
