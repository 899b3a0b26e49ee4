/*!
 * Desktop front end for gios_rs.
 *
 * Stations on the left, parameters and the date window in the middle, the
 * report below them and a bar chart of the readings along the bottom edge.
 * Every API call runs on a worker thread so the window keeps repainting.
 */

use chrono::{Duration, Local};
use eframe::egui;
use gios_rs::error::Result as GiosResult;
use gios_rs::session::FetchRequest;
use gios_rs::viz::{self, Canvas, MARGIN_LEFT, MARGIN_RIGHT, Point, Rgb};
use gios_rs::{AirQualitySource, Client, Sensor, SensorData, Session, Station};
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

const CHART_HEIGHT: f32 = 200.0;
const INPUT_FORMAT: &str = "%d-%m-%Y %H:%M";

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Lista stacji GIOŚ"),
        ..Default::default()
    };

    eframe::run_native(
        "Lista stacji GIOŚ",
        options,
        Box::new(|_cc| Ok(Box::new(GiosApp::new(Client::default())))),
    )
}

/// Finished background work, handed back to the UI thread.
enum Operation {
    Stations(GiosResult<Vec<Station>>),
    Sensors(GiosResult<Vec<Sensor>>),
    Readings {
        request: FetchRequest,
        result: GiosResult<SensorData>,
    },
}

struct GiosApp {
    session: Session,
    client: Client,

    date_from: String,
    date_to: String,

    chart_width: u32,
    status_message: String,

    is_loading: bool,
    operation_receiver: Option<mpsc::Receiver<Operation>>,
}

impl GiosApp {
    fn new(client: Client) -> Self {
        let now = Local::now().naive_local();
        let mut app = Self {
            session: Session::new(),
            client,
            date_from: (now - Duration::hours(6)).format(INPUT_FORMAT).to_string(),
            date_to: now.format(INPUT_FORMAT).to_string(),
            chart_width: 800,
            status_message: String::new(),
            is_loading: false,
            operation_receiver: None,
        };
        app.spawn(|client| Operation::Stations(client.stations()));
        app
    }

    fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce(&Client) -> Operation + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        self.operation_receiver = Some(receiver);
        self.is_loading = true;

        let client = self.client.clone();
        thread::spawn(move || {
            let _ = sender.send(job(&client));
        });
    }

    fn start_station(&mut self, index: usize) {
        if let Some(id) = self.session.select_station(index) {
            self.spawn(move |client| Operation::Sensors(client.sensors(id)));
        }
    }

    fn start_fetch(&mut self) {
        let now = Local::now().naive_local();
        let Ok(request) = self.session.prepare_fetch(&self.date_from, &self.date_to, now) else {
            return;
        };
        self.spawn(move |client| {
            let result = client.readings(request.sensor_id);
            Operation::Readings { request, result }
        });
    }

    fn check_operation_result(&mut self) {
        let Some(receiver) = &self.operation_receiver else {
            return;
        };
        let operation = match receiver.try_recv() {
            Ok(operation) => operation,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                log::error!("worker thread exited without a result");
                self.is_loading = false;
                self.operation_receiver = None;
                self.status_message = "Operacja przerwana. Spróbuj ponownie.".to_string();
                return;
            }
        };
        self.is_loading = false;
        self.operation_receiver = None;

        match operation {
            Operation::Stations(result) => self.session.apply_stations(result),
            Operation::Sensors(result) => self.session.apply_sensors(result),
            Operation::Readings { request, result } => {
                // The message is already in the session output.
                let _ = self.session.apply_readings(&request, result);
            }
        }
    }

    fn save_chart(&mut self) {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(home)
            .set_file_name("wykres.svg")
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            return;
        };

        self.status_message = match viz::save_chart(
            self.session.series(),
            &path,
            self.chart_width,
            CHART_HEIGHT as u32,
        ) {
            Ok(()) => format!("Zapisano wykres: {}", path.display()),
            Err(err) => format!("Nie udało się zapisać wykresu: {err}"),
        };
    }

    fn station_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Stacje");
        ui.add_space(5.0);

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, station) in self.session.stations().iter().enumerate() {
                    let selected = self.session.selected_station() == Some(i);
                    let label =
                        egui::SelectableLabel::new(selected, station.station_name.as_str());
                    if ui.add_enabled(!self.is_loading, label).clicked() {
                        clicked = Some(i);
                    }
                }
            });

        if let Some(i) = clicked {
            self.start_station(i);
        }
    }

    fn query_panel(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label("Parametry");
            ui.add_space(5.0);

            let mut clicked = None;
            ui.horizontal_wrapped(|ui| {
                for (i, name) in self.session.sensors().param_names().enumerate() {
                    let selected = self.session.selected_sensor() == Some(i);
                    if ui.radio(selected, name).clicked() {
                        clicked = Some(i);
                    }
                }
            });
            if let Some(i) = clicked {
                self.session.select_sensor(i);
            }
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label("Od (DD-MM-YYYY HH:MM):");
            ui.text_edit_singleline(&mut self.date_from);
        });
        ui.horizontal(|ui| {
            ui.label("Do (DD-MM-YYYY HH:MM):");
            ui.text_edit_singleline(&mut self.date_to);
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.is_loading, egui::Button::new("Pobierz dane parametru"))
                .clicked()
            {
                self.start_fetch();
            }

            let can_save = !self.is_loading && !self.session.series().is_empty();
            if ui
                .add_enabled(can_save, egui::Button::new("Zapisz wykres…"))
                .clicked()
            {
                self.save_chart();
            }

            if self.is_loading {
                ui.spinner();
            }
        });

        if !self.status_message.is_empty() {
            ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
        }

        ui.add_space(10.0);

        let mut output = self.session.output();
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut output)
                    .desired_width(f32::INFINITY)
                    .font(egui::TextStyle::Monospace),
            );
        });
    }

    fn chart_panel(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(ui.available_width(), CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect;
        self.chart_width = rect.width() as u32;

        let series = self.session.series();
        let mut canvas = EguiCanvas {
            painter: &painter,
            rect,
        };
        let Ok(()) = viz::render(series, rect.width() as i32, rect.height() as i32, &mut canvas);

        if series.is_empty() {
            return;
        }
        if let Some(pos) = response.hover_pos() {
            let plot_w = rect.width() as i32 - MARGIN_LEFT - MARGIN_RIGHT;
            let bar_w = (plot_w / series.len() as i32).max(1);
            let x = (pos.x - rect.min.x) as i32 - MARGIN_LEFT;
            if x >= 0
                && let Some((value, label)) = series
                    .values()
                    .get((x / bar_w) as usize)
                    .zip(series.labels().get((x / bar_w) as usize))
            {
                response.on_hover_text(format!("{label}: {value:.1}"));
            }
        }
    }
}

impl eframe::App for GiosApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_operation_result();

        if self.is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::bottom("chart")
            .exact_height(CHART_HEIGHT + 8.0)
            .show(ctx, |ui| self.chart_panel(ui));

        egui::SidePanel::left("stations")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| self.station_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.query_panel(ui));
    }
}

/// Replays chart operations onto an egui painter, offset to `rect`.
struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl EguiCanvas<'_> {
    fn pos(&self, (x, y): Point) -> egui::Pos2 {
        self.rect.min + egui::vec2(x as f32, y as f32)
    }
}

fn color(Rgb(r, g, b): Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}

impl Canvas for EguiCanvas<'_> {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Infallible> {
        self.painter.rect_filled(self.rect, 0.0, egui::Color32::WHITE);
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, rgb: Rgb) -> Result<(), Infallible> {
        self.painter.line_segment(
            [self.pos(from), self.pos(to)],
            egui::Stroke::new(1.0, color(rgb)),
        );
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, rgb: Rgb) -> Result<(), Infallible> {
        self.painter.text(
            self.pos(at),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::proportional(11.0),
            color(rgb),
        );
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        rgb: Rgb,
    ) -> Result<(), Infallible> {
        let min = self.pos((x, y));
        let rect = egui::Rect::from_min_size(min, egui::vec2(width as f32, height as f32));
        self.painter.rect_filled(rect, 0.0, color(rgb));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_app() -> GiosApp {
        GiosApp {
            session: Session::new(),
            client: Client::new("http://127.0.0.1:9"),
            date_from: String::new(),
            date_to: String::new(),
            chart_width: 800,
            status_message: String::new(),
            is_loading: false,
            operation_receiver: None,
        }
    }

    #[test]
    fn worker_that_dies_releases_the_ui() {
        let mut app = idle_app();
        app.spawn(|_| panic!("worker failed"));

        // Wait for the panicking thread to drop its sender.
        for _ in 0..200 {
            app.check_operation_result();
            if !app.is_loading {
                break;
            }
            thread::sleep(std::time::Duration::from_millis(10));
        }
        assert!(!app.is_loading);
        assert!(app.operation_receiver.is_none());
        assert_eq!(app.status_message, "Operacja przerwana. Spróbuj ponownie.");
    }

    #[test]
    fn finished_worker_result_is_applied() {
        let mut app = idle_app();
        let (sender, receiver) = mpsc::channel();
        app.operation_receiver = Some(receiver);
        app.is_loading = true;

        app.check_operation_result();
        assert!(app.is_loading, "nothing received yet");

        sender
            .send(Operation::Stations(Ok(vec![Station {
                id: 7,
                station_name: "Łódź-Czernika".into(),
            }])))
            .unwrap();
        app.check_operation_result();
        assert!(!app.is_loading);
        assert_eq!(app.session.stations().len(), 1);
        assert!(app.status_message.is_empty());
    }
}
