// src/noyau/parentheses.rs
//
// Utilitaires de parenthèses, utilisés avant chaque découpage.
// Rien ici ne produit d’erreur : ce sont des lectures “consultatives”.

/// Retire les parenthèses externes redondantes : "((1+2))" -> "1+2".
///
/// On ne retire une paire que si la parenthèse ouvrante du début se ferme
/// exactement sur le dernier caractère. "(1)*(2)" reste intact.
/// Entrée déséquilibrée => renvoyée telle quelle (l’appelant signalera l’erreur).
pub fn retirer_parentheses_externes(expr: &str) -> &str {
    let mut s = expr;

    loop {
        if !s.starts_with('(') || !s.ends_with(')') || s.len() < 2 {
            return s;
        }

        match position_fermante(s, 0) {
            Some(i) if i == s.len() - 1 => s = &s[1..s.len() - 1],
            _ => return s,
        }
    }
}

/// Index (octets) de la parenthèse qui ferme celle ouverte en `ouvrante`.
/// None si `ouvrante` n’est pas '(' ou si le solde devient négatif / ne revient jamais à 0.
pub fn position_fermante(s: &str, ouvrante: usize) -> Option<usize> {
    if s.as_bytes().get(ouvrante) != Some(&b'(') {
        return None;
    }

    let mut solde: i64 = 0;
    for (i, c) in s[ouvrante..].char_indices() {
        match c {
            '(' => solde += 1,
            ')' => solde -= 1,
            _ => {}
        }
        if solde < 0 {
            return None;
        }
        if solde == 0 {
            return Some(ouvrante + i);
        }
    }

    None
}

/// Solde jamais négatif, et nul à la fin.
pub fn est_equilibree(s: &str) -> bool {
    let mut solde: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => solde += 1,
            ')' => solde -= 1,
            _ => {}
        }
        if solde < 0 {
            return false;
        }
    }
    solde == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retire_simple() {
        assert_eq!(retirer_parentheses_externes("(1+2)"), "1+2");
    }

    #[test]
    fn rien_a_retirer() {
        assert_eq!(retirer_parentheses_externes("4*2+3/2"), "4*2+3/2");
    }

    #[test]
    fn plusieurs_niveaux() {
        assert_eq!(retirer_parentheses_externes("((2*3+5))"), "2*3+5");
    }

    #[test]
    fn fausses_externes() {
        assert_eq!(
            retirer_parentheses_externes("(-1)*(2+5*(3+1))/(2+1)"),
            "(-1)*(2+5*(3+1))/(2+1)"
        );
    }

    #[test]
    fn vraies_puis_fausses() {
        assert_eq!(
            retirer_parentheses_externes("((-3*2)+(2+(3/2)*2))"),
            "(-3*2)+(2+(3/2)*2)"
        );
    }

    #[test]
    fn desequilibre_renvoye_tel_quel() {
        assert_eq!(retirer_parentheses_externes("((1)"), "((1)");
        assert_eq!(retirer_parentheses_externes("(5+((1))))"), "(5+((1))))");
        assert_eq!(retirer_parentheses_externes("()"), "");
    }

    #[test]
    fn fermante_trouvee() {
        assert_eq!(position_fermante("max(1,(2))", 3), Some(9));
        assert_eq!(position_fermante("f(1", 1), None);
        assert_eq!(position_fermante("abc", 0), None);
    }

    #[test]
    fn equilibre() {
        assert!(est_equilibree("(1+(2))"));
        assert!(!est_equilibree("(1+2"));
        assert!(!est_equilibree(")("));
    }
}
