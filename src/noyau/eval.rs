//! Noyau : évaluation récursive sur le texte
//!
//! parenthèses externes -> littéral ? -> signe unaire (0 implicite)
//!   -> découpage par bande (+ -, puis * / # %, puis ^) -> réduction des triplets
//!   -> sinon : identifiant (variable) ou appel de fonction
//!
//! Remarque : pas d’AST persistant. Chaque sous-chaîne est ré-analysée
//! au niveau où elle est évaluée ; la profondeur est bornée par `Contexte`.

use std::borrow::Cow;

use super::appel::analyser_appel;
use super::erreur::{ErreurCalcul, Resultat};
use super::operateurs::{depuis_symbole, est_symbole_operateur, Associativite, Bande, OperateurBinaire};
use super::parentheses::retirer_parentheses_externes;
use super::table::{valider_identifiant, TableSymboles};

/// Plafond de la profondeur réglable.
/// En natif, la pile est agrandie à la demande (stacker) ; en wasm32, la pile
/// du navigateur est fixe (1 Mio) et le plafond est plus bas.
#[cfg(not(target_arch = "wasm32"))]
pub const PROFONDEUR_MAX_PLAFOND: usize = 512;
#[cfg(target_arch = "wasm32")]
pub const PROFONDEUR_MAX_PLAFOND: usize = 128;

/// Profondeur de récursion par défaut (jamais au-dessus du plafond).
pub const PROFONDEUR_MAX_DEFAUT: usize = if 200 < PROFONDEUR_MAX_PLAFOND {
    200
} else {
    PROFONDEUR_MAX_PLAFOND
};

/// Marge restante sous laquelle on agrandit la pile, et taille de l’ajout.
#[cfg(not(target_arch = "wasm32"))]
const ZONE_ROUGE_PILE: usize = 128 * 1024;
#[cfg(not(target_arch = "wasm32"))]
const CROISSANCE_PILE: usize = 2 * 1024 * 1024;

/// Profondeur courante + limite, passées par valeur à chaque niveau.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contexte {
    profondeur: usize,
    limite: usize,
}

impl Contexte {
    /// Contexte de départ ; la limite est bornée à [1, PROFONDEUR_MAX_PLAFOND].
    pub fn racine(limite: usize) -> Self {
        Self {
            profondeur: 0,
            limite: limite.clamp(1, PROFONDEUR_MAX_PLAFOND),
        }
    }

    pub fn defaut() -> Self {
        Self::racine(PROFONDEUR_MAX_DEFAUT)
    }

    pub fn profondeur(self) -> usize {
        self.profondeur
    }

    pub fn limite(self) -> usize {
        self.limite
    }

    fn descendre(self) -> Resultat<Self> {
        if self.profondeur >= self.limite {
            log::warn!("limite de récursion atteinte ({})", self.limite);
            return Err(ErreurCalcul::LimiteRecursion { limite: self.limite });
        }
        Ok(Self {
            profondeur: self.profondeur + 1,
            ..self
        })
    }
}

impl Default for Contexte {
    fn default() -> Self {
        Self::defaut()
    }
}

/// Valeur déjà calculée, ou fragment de texte pas encore évalué.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Expression<'a> {
    Valeur(f64),
    Texte(&'a str),
}

impl Expression<'_> {
    pub fn evaluer(&self, table: &TableSymboles, ctx: Contexte) -> Resultat<f64> {
        evaluer(self, table, ctx)
    }
}

/// Jeton d’un découpage : opérandes et opérateurs alternés.
#[derive(Clone, Copy, Debug)]
enum Jeton<'a> {
    Operande(Expression<'a>),
    Operateur(&'static OperateurBinaire),
}

/// API publique : évalue une expression contre une table.
pub fn evaluer(expr: &Expression<'_>, table: &TableSymboles, ctx: Contexte) -> Resultat<f64> {
    match *expr {
        Expression::Valeur(v) => Ok(v),
        Expression::Texte(s) => {
            let ctx = ctx.descendre()?;
            avec_pile(|| evaluer_texte(s, table, ctx))
        }
    }
}

/// Chaque niveau d’évaluation passe ici : la pile ne déborde pas avant la limite.
#[cfg(not(target_arch = "wasm32"))]
fn avec_pile<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(ZONE_ROUGE_PILE, CROISSANCE_PILE, f)
}

#[cfg(target_arch = "wasm32")]
fn avec_pile<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Raccourci : texte déjà préparé, contexte par défaut.
pub fn evaluer_chaine(s: &str, table: &TableSymboles) -> Resultat<f64> {
    evaluer(&Expression::Texte(s), table, Contexte::defaut())
}

fn evaluer_texte(texte: &str, table: &TableSymboles, ctx: Contexte) -> Resultat<f64> {
    // 1) Parenthèses externes redondantes
    let s = retirer_parentheses_externes(texte);

    // 2) Cas de base : littéral
    if let Some(v) = lire_litteral(s) {
        return Ok(v);
    }

    if s.is_empty() {
        return Err(ErreurCalcul::syntaxe(format!("expression vide : '{texte}'")));
    }

    // 3) Signe unaire : "-x" => "0-x"
    let prepare: Cow<'_, str> = if s.starts_with(['+', '-']) {
        Cow::Owned(format!("0{s}"))
    } else {
        Cow::Borrowed(s)
    };

    // 4) Première bande qui découpe en au moins deux morceaux
    for bande in Bande::ORDRE {
        if let Some(jetons) = decouper(&prepare, bande)? {
            return reduire(jetons, bande.associativite(), table, ctx);
        }
    }

    // 5) Jeton irréductible : variable ou appel
    resoudre_identifiant(&prepare, table, ctx)
}

/* ------------------------ Littéraux ------------------------ */

/// Littéral décimal : zéros et '_' de tête ignorés, '_' permis entre deux chiffres,
/// au plus un '.', au moins un chiffre, exposant optionnel (e, E, signé).
/// "007" -> 7, ".5" -> 0.5, "5." -> 5, "1_000" -> 1000, "1.5e-3" -> 0.0015 ;
/// "inf", "nan", "e5" ne sont pas des littéraux. Valeur non finie : pas un littéral.
pub fn lire_litteral(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }

    let reste = s.trim_start_matches(['0', '_']);
    let zero_de_tete = s[..s.len() - reste.len()].contains('0');

    let (mantisse, exposant) = match reste.find(['e', 'E']) {
        Some(i) => (&reste[..i], Some(&reste[i + 1..])),
        None => (reste, None),
    };

    let mut texte = nettoyer_mantisse(mantisse)?;
    if !texte.bytes().any(|b| b.is_ascii_digit()) {
        // "000", "0.", "0e3" : seuls les zéros de tête portaient les chiffres
        if !zero_de_tete {
            return None;
        }
        texte = "0".to_string();
    }

    if let Some(e) = exposant {
        let chiffres = e.strip_prefix(['+', '-']).unwrap_or(e);
        if chiffres.is_empty() || !chiffres.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        texte.push('e');
        texte.push_str(e);
    }

    texte.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Chiffres et au plus un '.' ; les '_' entre deux chiffres sont retirés.
fn nettoyer_mantisse(m: &str) -> Option<String> {
    let octets = m.as_bytes();
    let mut net = String::with_capacity(m.len());
    let mut points = 0;

    for (i, c) in m.char_indices() {
        match c {
            '0'..='9' => net.push(c),
            '.' => {
                points += 1;
                net.push(c);
            }
            '_' => {
                let avant = i
                    .checked_sub(1)
                    .and_then(|j| octets.get(j))
                    .is_some_and(u8::is_ascii_digit);
                let apres = octets.get(i + 1).is_some_and(u8::is_ascii_digit);
                if !(avant && apres) {
                    return None;
                }
            }
            _ => return None,
        }
    }

    (points <= 1).then_some(net)
}

/* ------------------------ Découpage par bande ------------------------ */

fn est_caractere_permis(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ',' | '(' | ')') || est_symbole_operateur(c)
}

fn debut_valide(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '(' | ')' | '.')
}

fn fin_valide(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ')')
}

fn segment_valide<'a>(segment: &'a str, expr: &str) -> Resultat<&'a str> {
    let bords_ok = match (segment.chars().next(), segment.chars().last()) {
        (Some(d), Some(f)) => debut_valide(d) && fin_valide(f),
        _ => false,
    };
    if !bords_ok {
        return Err(ErreurCalcul::syntaxe(format!("saisie incorrecte : {expr}")));
    }
    Ok(segment)
}

/// '+' ou '-' en position `i` qui appartient à un littéral : "1.5e-3", "2E+4".
/// Le mot qui précède doit être une mantisse numérique suivie de 'e'/'E',
/// et un chiffre doit suivre.
fn est_signe_d_exposant(s: &str, i: usize) -> bool {
    if !matches!(s[i..].chars().next(), Some('+' | '-')) {
        return false;
    }
    if !s[i + 1..].starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    let Some(avant) = s[..i].strip_suffix(['e', 'E']) else {
        return false;
    };

    let debut = avant
        .rfind(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.')))
        .map_or(0, |j| j + 1);
    let mantisse = &avant[debut..];

    mantisse.bytes().any(|b| b.is_ascii_digit())
        && mantisse
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'_' | b'.'))
}

/// Découpe `s` sur les opérateurs de `bande` situés à profondeur 0.
/// None si un seul morceau (la bande ne s’applique pas).
fn decouper(s: &str, bande: Bande) -> Resultat<Option<Vec<Jeton<'_>>>> {
    let symboles = bande.symboles();

    let mut jetons: Vec<Jeton<'_>> = Vec::new();
    let mut profondeur: i64 = 0;
    let mut debut = 0;

    for (i, c) in s.char_indices() {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur -= 1;
                if profondeur < 0 {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "parenthèse fermante en trop : {s}"
                    )));
                }
            }
            ',' if profondeur == 0 => {
                return Err(ErreurCalcul::syntaxe(format!("virgule hors d’un appel : {s}")));
            }
            _ if !est_caractere_permis(c) => {
                return Err(ErreurCalcul::syntaxe(format!("symbole inconnu '{c}' : {s}")));
            }
            _ => {}
        }

        if profondeur == 0 && symboles.contains(&c) && !est_signe_d_exposant(s, i) {
            let operateur = depuis_symbole(c)
                .ok_or_else(|| ErreurCalcul::Interne(format!("opérateur '{c}' absent de la table")))?;

            jetons.push(Jeton::Operande(Expression::Texte(segment_valide(&s[debut..i], s)?)));
            jetons.push(Jeton::Operateur(operateur));
            debut = i + c.len_utf8();
        }
    }

    if profondeur != 0 {
        return Err(ErreurCalcul::syntaxe(format!("parenthèses non fermées : {s}")));
    }

    jetons.push(Jeton::Operande(Expression::Texte(segment_valide(&s[debut..], s)?)));

    Ok((jetons.len() > 1).then_some(jetons))
}

/* ------------------------ Réduction ------------------------ */

/// Réduit les triplets (opérande, opérateur, opérande) de gauche à droite.
/// Associativité à droite : on parcourt la liste à l’envers et on échange les rôles.
fn reduire(
    jetons: Vec<Jeton<'_>>,
    associativite: Associativite,
    table: &TableSymboles,
    ctx: Contexte,
) -> Resultat<f64> {
    let ordre: Vec<Jeton<'_>> = match associativite {
        Associativite::Gauche => jetons,
        Associativite::Droite => jetons.into_iter().rev().collect(),
    };

    let mut pile: Vec<Jeton<'_>> = Vec::with_capacity(3);

    for jeton in ordre {
        pile.push(jeton);
        if pile.len() < 3 {
            continue;
        }

        let (Some(Jeton::Operande(b)), Some(Jeton::Operateur(op)), Some(Jeton::Operande(a))) =
            (pile.pop(), pile.pop(), pile.pop())
        else {
            return Err(ErreurCalcul::Interne("opérandes et opérateurs mal alternés".into()));
        };

        let (gauche, droite) = match associativite {
            Associativite::Gauche => (a, b),
            Associativite::Droite => (b, a),
        };

        let g = evaluer(&gauche, table, ctx)?;
        let d = evaluer(&droite, table, ctx)?;
        pile.push(Jeton::Operande(Expression::Valeur(op.appliquer(g, d)?)));
    }

    match pile.as_slice() {
        [Jeton::Operande(e)] => evaluer(e, table, ctx),
        reste => Err(ErreurCalcul::Interne(format!(
            "il reste {} jetons après réduction",
            reste.len()
        ))),
    }
}

/* ------------------------ Identifiants / appels ------------------------ */

fn commence_comme_nombre(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

fn resoudre_identifiant(s: &str, table: &TableSymboles, ctx: Contexte) -> Resultat<f64> {
    match analyser_appel(s)? {
        Some(appel) => {
            // "1(2+3)", "(2+3)(3/4)" : il manque un opérateur entre deux opérandes
            if appel.nom.is_empty() || commence_comme_nombre(appel.nom) {
                return Err(ErreurCalcul::syntaxe(format!("opérateur manquant : {s}")));
            }
            valider_identifiant(appel.nom)?;

            let fonction = table.fonction(appel.nom)?;

            let valeurs = appel
                .arguments
                .iter()
                .map(|arg| evaluer(&Expression::Texte(arg), table, ctx))
                .collect::<Resultat<Vec<f64>>>()?;

            fonction.appeler(appel.nom, &valeurs, Some(table), ctx)
        }
        None => {
            if commence_comme_nombre(s) {
                return Err(ErreurCalcul::syntaxe(format!(
                    "nombre invalide ou opérateur manquant : {s}"
                )));
            }
            valider_identifiant(s)?;
            table.nombre(s)
        }
    }
}
