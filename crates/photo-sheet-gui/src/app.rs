use eframe::egui;
use photo_sheet::{
    ExportRegistry, FitMode, ImageQueue, SheetOptions, SlotGestures,
    calculate_statistics, is_supported_image,
};
use photo_sheet_runtime::{CommandSender, LoadedImage, SheetCommand, SheetUpdate, UpdateReceiver};

use crate::logger::AppLogger;
use crate::views::{
    SettingsAction, SheetAction, SlotTexture, ToolbarAction, show_queue, show_settings,
    show_sheet, show_toolbar,
};

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct PhotoSheetApp {
    queue: ImageQueue<SlotTexture>,
    gestures: SlotGestures,
    registry: ExportRegistry,
    options: SheetOptions,
    default_fit: FitMode,
    status: String,
    show_log: bool,

    // Async infrastructure
    command_tx: CommandSender,
    update_rx: UpdateReceiver,

    // Progress tracking
    progress: Option<ProgressState>,
    exporting: bool,

    logger: AppLogger,
    _tokio_handle: tokio::runtime::Handle,
}

impl PhotoSheetApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let ((command_tx, update_rx), (command_rx, update_tx)) = photo_sheet_runtime::channels();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            queue: ImageQueue::new(),
            gestures: SlotGestures::new(),
            registry: ExportRegistry::new(),
            options: SheetOptions::default(),
            default_fit: FitMode::default(),
            status: String::new(),
            show_log: false,
            command_tx,
            update_rx,
            progress: None,
            exporting: false,
            logger,
            _tokio_handle: tokio_handle,
        }
    }

    fn send(&mut self, command: SheetCommand) {
        let name = command.name();
        if self.command_tx.send(command).is_err() {
            log::error!("Worker is gone, cannot {name}");
            self.status = format!("Cannot {name}: background worker stopped");
        }
    }

    fn add_photos(&mut self, paths: Vec<std::path::PathBuf>) {
        let (images, skipped): (Vec<_>, Vec<_>) =
            paths.into_iter().partition(|p| is_supported_image(p));
        for path in &skipped {
            log::warn!("Skipping unsupported file {}", path.display());
        }
        if images.is_empty() {
            self.status = "No supported images selected".to_string();
            return;
        }
        self.status = format!("Loading {} photos...", images.len());
        self.send(SheetCommand::LoadImages { paths: images });
    }

    /// Turn decoded previews into textures and append them in order
    fn append_loaded(&mut self, ctx: &egui::Context, loaded: Vec<LoadedImage>) {
        let fit = self.default_fit;
        let count = loaded.len();
        let batch = loaded.into_iter().map(|LoadedImage { mut image, thumbnail }| {
            image.adjustment.fit_mode = fit;
            let texture = thumbnail.map(|thumb| {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [thumb.width as usize, thumb.height as usize],
                    &thumb.rgba,
                );
                ctx.load_texture(
                    format!("photo-{}", image.id),
                    color_image,
                    egui::TextureOptions::LINEAR,
                )
            });
            (image, texture)
        });
        self.queue.append(batch);
        self.status = format!("Added {} photos", count);
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            if !matches!(update, SheetUpdate::Progress { .. }) {
                self.progress = None;
            }
            match update {
                SheetUpdate::Progress {
                    operation,
                    current,
                    total,
                } => {
                    self.progress = Some(ProgressState {
                        operation,
                        current,
                        total,
                    });
                    ctx.request_repaint();
                }
                SheetUpdate::ImagesLoaded { images } => {
                    self.append_loaded(ctx, images);
                }
                SheetUpdate::SheetExported { sheet_id, path } => {
                    self.exporting = false;
                    self.status = format!("Sheet {} → {}", sheet_id, path.display());
                }
                SheetUpdate::ArchiveExported { path, sheet_count } => {
                    self.exporting = false;
                    self.status = match path {
                        Some(path) => format!("Zipped {} sheets → {}", sheet_count, path.display()),
                        None => "No sheets to export".to_string(),
                    };
                }
                SheetUpdate::PrintExported { path, page_count } => {
                    self.exporting = false;
                    self.status = match path {
                        Some(path) => format!("Printed {} pages → {}", page_count, path.display()),
                        None => "No sheets to print".to_string(),
                    };
                }
                SheetUpdate::ConfigLoaded { options } => {
                    self.options = options;
                    self.status = "Configuration loaded".to_string();
                }
                SheetUpdate::ConfigSaved { path } => {
                    self.status = format!("Configuration saved → {}", path.display());
                }
                SheetUpdate::Error { message } => {
                    self.exporting = false;
                    self.status = format!("Error: {message}");
                }
            }
        }
    }

    fn apply_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::AddPhotos(paths) => self.add_photos(paths),
            ToolbarAction::ClearAll => {
                self.queue.clear();
                self.gestures.clear();
                self.status = "Cleared all photos".to_string();
            }
            ToolbarAction::ExportArchive => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Zip", &["zip"])
                    .set_file_name(self.options.archive_file_name())
                    .save_file()
                {
                    self.exporting = true;
                    self.send(SheetCommand::ExportArchive {
                        sheets: self.registry.snapshot(),
                        options: self.options.clone(),
                        output_path: path,
                    });
                }
            }
            ToolbarAction::ExportPrint => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .set_file_name(self.options.print_file_name())
                    .save_file()
                {
                    self.exporting = true;
                    self.send(SheetCommand::ExportPrint {
                        sheets: self.registry.snapshot(),
                        options: self.options.clone(),
                        output_path: path,
                    });
                }
            }
        }
    }

    fn apply_sheet(&mut self, action: SheetAction) {
        match action {
            SheetAction::Adjust { id, adjustment } => {
                self.queue.update_adjustment(&id, adjustment);
            }
            SheetAction::Export { sheet_id } => {
                let Some(sheet) = self.registry.get(sheet_id).cloned() else {
                    return;
                };
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PNG", &["png"])
                    .set_file_name(self.options.sheet_file_name(sheet_id))
                    .save_file()
                {
                    self.exporting = true;
                    self.send(SheetCommand::ExportSheet {
                        sheet,
                        options: self.options.clone(),
                        output_path: path,
                    });
                }
            }
        }
    }

    fn apply_settings(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::Save(path) => self.send(SheetCommand::SaveConfig {
                options: self.options.clone(),
                path,
            }),
            SettingsAction::Load(path) => self.send(SheetCommand::LoadConfig { path }),
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if let Some(ref progress) = self.progress {
                ui.label(&progress.operation);
                ui.add(
                    egui::ProgressBar::new(progress.current as f32 / progress.total.max(1) as f32)
                        .show_percentage(),
                );
                ctx.request_repaint(); // Keep updating during operations
            }

            ui.horizontal(|ui| {
                ui.toggle_value(&mut self.show_log, "📜 Log");
                if !self.status.is_empty() {
                    ui.label(&self.status);
                } else if let Some(message) = self.logger.latest_message() {
                    ui.weak(message);
                }
            });

            if self.show_log {
                ui.separator();
                egui::ScrollArea::vertical()
                    .max_height(160.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in self.logger.get_entries() {
                            ui.monospace(entry.display_line());
                        }
                    });
                if ui.small_button("Clear log").clicked() {
                    self.logger.clear();
                }
            }
        });
    }
}

impl eframe::App for PhotoSheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle drag-and-drop for image files
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.add_photos(dropped);
        }

        self.process_updates(ctx);

        // A release anywhere ends a drag, even outside its slot
        if ctx.input(|i| i.pointer.any_released()) {
            self.gestures.release_all();
        }

        let sheets = self.queue.sheets();
        self.gestures.sync(&sheets);
        self.registry.sync(&sheets);

        let mut toolbar_actions = Vec::new();
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            show_toolbar(ui, sheets.len(), self.exporting, &mut toolbar_actions);
        });

        self.show_status_bar(ctx);

        let stats = calculate_statistics(&self.queue.snapshot());
        let mut settings_actions = Vec::new();
        let mut removed = Vec::new();
        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    show_settings(
                        ui,
                        &mut self.options,
                        &mut self.default_fit,
                        &stats,
                        &mut settings_actions,
                    );
                    ui.separator();
                    show_queue(ui, &self.queue, &mut removed);
                });
            });

        let mut sheet_actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            if sheets.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("Add photos to start composing sheets");
                });
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                for sheet in self.registry.surfaces() {
                    show_sheet(
                        ui,
                        sheet,
                        &self.queue,
                        &mut self.gestures,
                        &self.options,
                        &mut sheet_actions,
                    );
                    ui.add_space(16.0);
                }
            });
        });

        for id in removed {
            self.queue.remove(&id);
        }
        for action in sheet_actions {
            self.apply_sheet(action);
        }
        for action in settings_actions {
            self.apply_settings(action);
        }
        for action in toolbar_actions {
            self.apply_toolbar(action);
        }
    }
}
