//! trackhub-client CLI entry point.

use clap::Parser;
use serde::Serialize;

use trackhub_client::cli::{Cli, Commands, OutputFormat};
use trackhub_client::client::TrackhubClient;
use trackhub_client::output::{format_output, pretty};
use trackhub_core::freelance::{CreateProjectInvoiceRequest, Invoice, Project};
use trackhub_core::fuel::{CreateFillUpRequest, CreateVehicleRequest, FillUp, Vehicle};
use trackhub_core::maintenance::{CompleteTaskRequest, Contractor, MaintenanceTask};

/// Prints `value` as JSON or through its pretty formatter.
fn emit<T: Serialize + ?Sized>(format: OutputFormat, value: &T, pretty: impl FnOnce(&T) -> String) {
    println!("{}", format_output(value, format, pretty));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TrackhubClient::new(&cli.base_url);
    let format = cli.format;

    match cli.command {
        Commands::Vehicles(vehicles_cmd) => {
            use trackhub_client::cli::vehicles::VehiclesAction;
            match vehicles_cmd.action {
                VehiclesAction::List => {
                    let vehicles = client.list::<Vehicle>(None).await?;
                    emit(format, &vehicles[..], pretty::format_vehicles);
                }
                VehiclesAction::Get { id } => {
                    let vehicle = client.get::<Vehicle>(id).await?;
                    emit(format, &vehicle, pretty::format_vehicle);
                }
                VehiclesAction::Create {
                    make,
                    model,
                    year,
                    vin,
                    license_plate,
                    tank_capacity,
                } => {
                    let request = CreateVehicleRequest {
                        make,
                        model,
                        year,
                        vin,
                        license_plate,
                        fuel_type: None,
                        tank_capacity,
                        epa_city_mpg: None,
                        epa_highway_mpg: None,
                    };
                    let vehicle = client.create::<Vehicle>(&request).await?;
                    emit(format, &vehicle, |v| {
                        format!("Created:\n{}", pretty::format_vehicle(v))
                    });
                }
                VehiclesAction::Delete { id } => {
                    client.delete::<Vehicle>(id).await?;
                    if !cli.quiet {
                        println!("Deleted vehicle {}", id);
                    }
                }
                VehiclesAction::Efficiency { id, start, end } => {
                    let report = client.vehicle_efficiency(id, start, end).await?;
                    emit(format, &report, pretty::format_efficiency);
                }
            }
        }
        Commands::FillUps(fill_ups_cmd) => {
            use trackhub_client::cli::fill_ups::FillUpsAction;
            match fill_ups_cmd.action {
                FillUpsAction::List { vehicle_id } => {
                    let fill_ups = client.list::<FillUp>(vehicle_id).await?;
                    emit(format, &fill_ups[..], pretty::format_fill_ups);
                }
                FillUpsAction::Create {
                    vehicle_id,
                    date,
                    odometer,
                    gallons,
                    price_per_gallon,
                    full_tank,
                    station,
                } => {
                    let mut request = CreateFillUpRequest::new(
                        vehicle_id,
                        date,
                        odometer,
                        gallons,
                        price_per_gallon,
                    );
                    request.is_full_tank = full_tank;
                    request.gas_station = station;

                    let fill_up = client.create::<FillUp>(&request).await?;
                    emit(format, &fill_up, |f| {
                        format!("Logged:\n{}", pretty::format_fill_up(f))
                    });
                }
            }
        }
        Commands::Tasks(tasks_cmd) => {
            use trackhub_client::cli::tasks::TasksAction;
            match tasks_cmd.action {
                TasksAction::List => {
                    let tasks = client.list::<MaintenanceTask>(None).await?;
                    emit(format, &tasks[..], pretty::format_tasks);
                }
                TasksAction::Overdue => {
                    let tasks = client.overdue_tasks().await?;
                    emit(format, &tasks[..], pretty::format_tasks);
                }
                TasksAction::Complete { id, date, cost } => {
                    let request = CompleteTaskRequest {
                        completed_date: date,
                        actual_cost: cost,
                    };
                    let response = client.complete_task(id, &request).await?;
                    emit(format, &response, pretty::format_completion);
                }
            }
        }
        Commands::Contractors(contractors_cmd) => {
            use trackhub_client::cli::contractors::ContractorsAction;
            match contractors_cmd.action {
                ContractorsAction::List => {
                    let contractors = client.list::<Contractor>(None).await?;
                    emit(format, &contractors[..], pretty::format_contractors);
                }
            }
        }
        Commands::Projects(projects_cmd) => {
            use trackhub_client::cli::projects::ProjectsAction;
            match projects_cmd.action {
                ProjectsAction::List { client_id } => {
                    let projects = client.list::<Project>(client_id).await?;
                    emit(format, &projects[..], pretty::format_projects);
                }
                ProjectsAction::Status { id, status } => {
                    let project = client.update_project_status(id, status.into()).await?;
                    emit(format, &project, |p| {
                        format!("Updated:\n{}", pretty::format_project(p))
                    });
                }
                ProjectsAction::Summary { id } => {
                    let summary = client.project_summary(id).await?;
                    emit(format, &summary, pretty::format_summary);
                }
                ProjectsAction::Invoice {
                    id,
                    number,
                    due_in_days,
                } => {
                    let request = CreateProjectInvoiceRequest {
                        invoice_number: number,
                        due_in_days,
                    };
                    let invoice = client.invoice_project(id, &request).await?;
                    emit(format, &invoice, |i| {
                        format!("Created:\n{}", pretty::format_invoice(i))
                    });
                }
            }
        }
        Commands::Invoices(invoices_cmd) => {
            use trackhub_client::cli::invoices::InvoicesAction;
            match invoices_cmd.action {
                InvoicesAction::List { client_id } => {
                    let invoices = client.list::<Invoice>(client_id).await?;
                    emit(format, &invoices[..], pretty::format_invoices);
                }
                InvoicesAction::Send { id } => {
                    let invoice = client.send_invoice(id).await?;
                    emit(format, &invoice, |i| format!("Sent:\n{}", pretty::format_invoice(i)));
                }
                InvoicesAction::Pay { id } => {
                    let invoice = client.pay_invoice(id).await?;
                    emit(format, &invoice, |i| format!("Paid:\n{}", pretty::format_invoice(i)));
                }
                InvoicesAction::Overdue => {
                    let invoices = client.overdue_invoices().await?;
                    emit(format, &invoices[..], pretty::format_invoices);
                }
            }
        }
        Commands::Events(events_cmd) => {
            use tokio_stream::StreamExt;
            use trackhub_client::cli::events::EventsAction;
            match events_cmd.action {
                EventsAction::Watch {
                    kinds,
                    last_event_id,
                } => {
                    if !cli.quiet {
                        eprintln!("Watching events on {}...", client.base_url());
                    }
                    let stream = client.watch_events(&kinds, last_event_id).await?;
                    tokio::pin!(stream);
                    while let Some(event_result) = stream.next().await {
                        match event_result {
                            Ok(streamed) => match format {
                                OutputFormat::Json => {
                                    println!("{}", serde_json::to_string(&streamed)?)
                                }
                                OutputFormat::Pretty => println!(
                                    "{}",
                                    pretty::format_event(streamed.event_id, &streamed.event)
                                ),
                            },
                            Err(e) => {
                                eprintln!("Error: {}", e);
                                break;
                            }
                        }
                    }
                }
            }
        }
        Commands::Health => {
            let health = client.health().await?;
            let ready = client.ready().await;
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "health": health,
                        "ready": ready.as_ref().map(|r| r.ready).unwrap_or(false),
                    })
                ),
                OutputFormat::Pretty => {
                    println!(
                        "Health:\n  Status: {}\n  Event history: {} (oldest id {})\n  Ready: {}",
                        health.status,
                        health.event_history_size,
                        health.oldest_event_id,
                        ready.as_ref().map(|r| r.ready).unwrap_or(false)
                    );
                    if let Err(e) = ready {
                        println!("  Error: {}", e);
                    }
                }
            }
        }
    }

    Ok(())
}
