// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter exécute (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Historique de session + table des symboles visibles
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use calculatrice_lambda::noyau::{Fonction, Liaison};

use super::etat::AppCalc;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice λ");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_table(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 5.2 - 2*3/0.5**2, x = 5, f = lambda(x,y): x+y*2")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter exécute seulement si le champ est focus
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.executer_entree();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = historique ; AC = tout (table comprise)
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface l’historique (les variables restent)",
                Action::ClearHistorique,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);

            ui.add_space(10.0);

            let exe = ui.add_sized([64.0, 30.0], egui::Button::new("⏎"));
            if exe.on_hover_text("Exécuter").clicked() {
                self.executer_entree();
            }
        });

        ui.add_space(8.0);

        // Opérateurs + fonctions + déclarations
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::Brut);
            self.bouton_insert(ui, ")", ")", InsertKind::Brut);
            self.bouton_insert(ui, ",", ",", InsertKind::Brut);

            for op in ["+", "-", "*", "/", "//", "%", "**"] {
                self.bouton_insert(ui, op, op, InsertKind::Op);
            }

            ui.separator();

            for f in ["max", "min", "abs", "sqrt", "pow"] {
                self.bouton_insert(ui, f, &format!("{f}("), InsertKind::Brut);
            }

            ui.separator();

            self.bouton_insert(ui, "x", "x", InsertKind::Brut);
            self.bouton_insert(ui, "y", "y", InsertKind::Brut);
            self.bouton_insert(ui, "=", "=", InsertKind::Op);
            self.bouton_insert(ui, "λ", "lambda(", InsertKind::Brut);
            self.bouton_insert(ui, ":", ":", InsertKind::Brut);
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(3)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"], ["0", ".", "_"]] {
                    for touche in ligne {
                        self.bouton_insert(ui, touche, touche, InsertKind::Brut);
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Historique ({}/{}) :", self.historique.len(), self.historique_max));

        let mut texte = String::new();
        for ligne in &self.historique {
            texte.push_str(&format!("> {}\n  {}\n", ligne.entree, ligne.sortie.texte()));
        }
        Self::champ_monospace(ui, "historique_out", &texte, 6);
    }

    fn ui_table(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Table des symboles")
            .default_open(false)
            .show(ui, |ui| {
                let mut texte = String::new();
                for (nom, liaison) in self.session.table().iter_triee() {
                    let ligne = match liaison {
                        Liaison::Nombre(v) => format!("{nom} = {v}\n"),
                        Liaison::Fonction(f) => match f.as_ref() {
                            Fonction::Native(_) => format!("{nom} : {f}\n"),
                            Fonction::Utilisateur(_) => format!("{nom} = {f}\n"),
                        },
                    };
                    texte.push_str(&ligne);
                }
                Self::champ_monospace(ui, "table_out", &texte, 4);
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule, cadre visuel via Frame + Label monospace.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearHistorique => self.clear_historique(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => {
                    self.entree.pop();
                }
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        match kind {
            InsertKind::Op => {
                // les blancs sont retirés par le noyau : purement visuel
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Brut => self.entree.push_str(to_insert),
        }

        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearHistorique,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Brut,
    Op,
}
