//! Scénarios de session complets (saisie brute -> executer).
//!
//! Couvre :
//! - les expressions de référence (précédence, parenthèses, unaires, chaîne longue)
//! - les saisies invalides (syntaxe, parenthèses)
//! - déclarations, lambdas, natives, limite de récursion
//! - atomicité : un échec ne modifie jamais la table

use super::calculatrice::Calculatrice;
use super::erreur::{CauseOperation, ErreurCalcul, GenreErreur};
use super::eval::PROFONDEUR_MAX_PLAFOND;

fn valeur(c: &mut Calculatrice, entree: &str) -> f64 {
    match c.executer(entree) {
        Ok(Some(v)) => v,
        Ok(None) => panic!("entree={entree:?} : valeur attendue, reçu une déclaration"),
        Err(e) => panic!("entree={entree:?} err={e}"),
    }
}

fn eval_ok(entree: &str) -> f64 {
    valeur(&mut Calculatrice::new(), entree)
}

fn declarer(c: &mut Calculatrice, entree: &str) {
    match c.executer(entree) {
        Ok(None) => {}
        autre => panic!("entree={entree:?} : déclaration attendue, reçu {autre:?}"),
    }
}

fn genre_err(c: &mut Calculatrice, entree: &str) -> GenreErreur {
    match c.executer(entree) {
        Err(e) => e.genre(),
        Ok(r) => panic!("entree={entree:?} : échec attendu, reçu {r:?}"),
    }
}

fn assert_genre(entree: &str, attendu: GenreErreur) {
    let mut c = Calculatrice::new();
    assert_eq!(genre_err(&mut c, entree), attendu, "entree={entree:?}");
}

/* ------------------------ Expressions de référence ------------------------ */

#[test]
fn scenario_operateurs_melanges() {
    assert_eq!(eval_ok("5.2 - 2*3/0.5**2 + 7%4//2"), -17.8);
}

#[test]
fn scenario_parentheses() {
    assert_eq!(eval_ok("5 + (-1)*((2+3/(2-1)))/(2-4)"), 7.5);
}

#[test]
fn scenario_unaires() {
    assert_eq!(eval_ok("-1 + (+2*3) - (-(+(-1)))"), 4.0);
}

#[test]
fn scenario_chaine_longue() {
    let terme = "5 + (-1)*((2+3/(2-1)))/(2-4)";
    let entree = vec![terme; 20].join("-");
    assert_eq!(eval_ok(&entree), -40.0);
}

#[test]
fn scenario_puissance_associative_a_droite() {
    assert_eq!(eval_ok("2**3**2"), 512.0);
    assert_eq!(eval_ok("(2**3)**2"), 64.0);
}

#[test]
fn scenario_soustraction_associative_a_gauche() {
    assert_eq!(eval_ok("10-4-3"), 3.0);
    assert_eq!(eval_ok("100/10/5"), 2.0);
}

#[test]
fn scenario_division_entiere_et_modulo() {
    assert_eq!(eval_ok("6//4"), 1.0);
    assert_eq!(eval_ok("(-7)//2"), -4.0);
    assert_eq!(eval_ok("(-7)%3"), 2.0);
    // le signe unaire lie moins fort que // et %
    assert_eq!(eval_ok("-7//2"), -3.0);
}

#[test]
fn scenario_arrondi_a_chaque_operation() {
    assert_eq!(eval_ok("1/3"), 0.33);
    assert_eq!(eval_ok("1/3*3"), 0.99);
    assert_eq!(eval_ok("0.1+0.2"), 0.3);
}

/* ------------------------ Saisies invalides ------------------------ */

#[test]
fn scenario_syntaxe_invalide() {
    for entree in [
        "    \n   ",
        "-",
        "1-+2",
        "1(2+3)",
        "(2+3)(3/4)",
        "1+(*2)",
        "2 $ 3",
        "1,2",
        "max()",
    ] {
        assert_genre(entree, GenreErreur::Syntaxe);
    }
}

#[test]
fn scenario_parentheses_desequilibrees() {
    for entree in ["5 + (1", "5 + 1)", "(5 + ((1))))", "max(1,2"] {
        assert_genre(entree, GenreErreur::Syntaxe);
    }
}

#[test]
fn scenario_erreurs_d_operation() {
    let mut c = Calculatrice::new();
    for entree in ["5/0", "5//0", "5%0", "5.5//2", "6**1000"] {
        assert_eq!(genre_err(&mut c, entree), GenreErreur::Operation, "entree={entree:?}");
    }
}

#[test]
fn scenario_message_d_operation() {
    let e = Calculatrice::new().executer("5 // 0").unwrap_err();
    assert_eq!(
        e,
        ErreurCalcul::Operation {
            gauche: 5.0,
            operateur: "//",
            droite: 0.0,
            cause: CauseOperation::DivisionParZero,
        }
    );
}

#[test]
fn scenario_identifiant_inconnu() {
    assert_genre("y+1", GenreErreur::IdentifiantInvalide);
    assert_genre("g(1)", GenreErreur::IdentifiantInvalide);
}

/* ------------------------ Déclarations ------------------------ */

#[test]
fn scenario_redeclaration() {
    let mut c = Calculatrice::new();
    declarer(&mut c, "x = 5");
    declarer(&mut c, "x = 2*x + 1");
    assert_eq!(valeur(&mut c, "x"), 11.0);

    declarer(&mut c, "x = 5");
    declarer(&mut c, "x = 2*x+1/x");
    assert_eq!(valeur(&mut c, "x"), 10.2);
}

#[test]
fn scenario_declarations_invalides() {
    let mut c = Calculatrice::new();
    assert_eq!(genre_err(&mut c, "123 = 5"), GenreErreur::IdentifiantInvalide);
    assert_eq!(genre_err(&mut c, "x = 5 = 7"), GenreErreur::Syntaxe);
}

#[test]
fn scenario_echec_atomique() {
    let mut c = Calculatrice::new();
    declarer(&mut c, "x = 1");
    let avant = c.table().len();

    assert_eq!(genre_err(&mut c, "x = 1/0"), GenreErreur::Operation);
    assert_eq!(genre_err(&mut c, "y = z"), GenreErreur::IdentifiantInvalide);
    assert_eq!(genre_err(&mut c, "f = lambda(a,a):a"), GenreErreur::IdentifiantInvalide);

    assert_eq!(c.table().len(), avant);
    assert_eq!(valeur(&mut c, "x"), 1.0);
}

/* ------------------------ Fonctions ------------------------ */

#[test]
fn scenario_natives_imbriquees() {
    assert_eq!(eval_ok("max(3.5, min(10, 8), abs(-15))"), 15.0);
    assert_eq!(eval_ok("sqrt(pow(25/5, 2))"), 5.0);
    assert_eq!(eval_ok("2.5*max(3.5,min(10,8),abs(-15))"), 37.5);
}

#[test]
fn scenario_native_hors_domaine() {
    assert_genre("sqrt(-4)", GenreErreur::Execution);
    assert_genre("pow(1)", GenreErreur::Arite);
}

#[test]
fn scenario_lambda() {
    let mut c = Calculatrice::new();
    declarer(&mut c, "f = lambda(x, y): x + y*2");
    assert_eq!(valeur(&mut c, "f(3, 4)"), 11.0);
    assert_eq!(valeur(&mut c, "f(1, f(1, 1))"), 7.0);
    assert_eq!(genre_err(&mut c, "f(3)"), GenreErreur::Arite);
    assert_eq!(genre_err(&mut c, "f(1, 2, 3)"), GenreErreur::Arite);
}

#[test]
fn scenario_lambda_ne_fuit_pas() {
    let mut c = Calculatrice::new();
    declarer(&mut c, "f = lambda(x): x*2");
    assert_eq!(valeur(&mut c, "f(3)"), 6.0);
    assert_eq!(genre_err(&mut c, "x"), GenreErreur::IdentifiantInvalide);

    declarer(&mut c, "x = 100");
    assert_eq!(valeur(&mut c, "f(3)"), 6.0);
    assert_eq!(valeur(&mut c, "x"), 100.0);
}

#[test]
fn scenario_lambda_voit_la_table_a_l_appel() {
    let mut c = Calculatrice::new();
    declarer(&mut c, "g = lambda(x): x + k");
    assert_eq!(genre_err(&mut c, "g(1)"), GenreErreur::IdentifiantInvalide);

    declarer(&mut c, "k = 10");
    assert_eq!(valeur(&mut c, "g(1)"), 11.0);
}

#[test]
fn scenario_fonction_utilisee_comme_variable() {
    let mut c = Calculatrice::new();
    declarer(&mut c, "f = lambda(x): x");
    assert_eq!(genre_err(&mut c, "f + 1"), GenreErreur::IdentifiantInvalide);
    assert_eq!(genre_err(&mut c, "max"), GenreErreur::IdentifiantInvalide);
}

#[test]
fn scenario_recursion_infinie() {
    let mut c = Calculatrice::new();
    declarer(&mut c, "f = lambda(x): f(x)");
    assert_eq!(genre_err(&mut c, "f(1)"), GenreErreur::LimiteRecursion);

    // la session reste utilisable
    assert_eq!(valeur(&mut c, "1+1"), 2.0);
}

#[test]
fn scenario_recursion_limite_configurable() {
    let mut c = Calculatrice::avec_profondeur_max(10);
    declarer(&mut c, "f = lambda(x): f(x)");
    let e = c.executer("f(1)").unwrap_err();
    assert_eq!(e, ErreurCalcul::LimiteRecursion { limite: 10 });
}

#[test]
fn scenario_recursion_au_plafond_sur_pile_par_defaut() {
    // thread::spawn : pile par défaut (2 Mio), comme un appelant ordinaire
    let fil = std::thread::spawn(|| {
        let mut c = Calculatrice::avec_profondeur_max(PROFONDEUR_MAX_PLAFOND);
        declarer(&mut c, "f = lambda(x): f(x)");
        let profonde = c.executer("f(1)");

        let mut imbrique = String::from("1");
        for _ in 0..PROFONDEUR_MAX_PLAFOND + 10 {
            imbrique = format!("1+({imbrique})");
        }
        (profonde, c.executer(&imbrique))
    });

    let (lambda, imbrique) = fil.join().expect("le fil d’évaluation a paniqué");
    let attendu = ErreurCalcul::LimiteRecursion {
        limite: PROFONDEUR_MAX_PLAFOND,
    };
    assert_eq!(lambda, Err(attendu.clone()));
    assert_eq!(imbrique, Err(attendu));
}
