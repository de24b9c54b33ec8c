//! Declarative form validation
//!
//! Field rules run client-side before any submission; a failed rule
//! records a field-scoped message and the form never issues the request.
//! Messages are the pt-BR strings the UI renders verbatim.

use std::collections::BTreeMap;

/// Field name to message. `BTreeMap` keeps iteration order stable for
/// rendering and tests.
pub type FieldErrors = BTreeMap<&'static str, String>;

pub const MSG_REQUIRED: &str = "O campo não deve ser nulo";
pub const MSG_NON_NEGATIVE: &str = "O valor deve ser 0 ou positivo";
pub const MSG_POSITIVE: &str = "O valor deve ser positivo";
pub const MSG_PASSWORDS_DIFFER: &str = "As senhas não coincidem";
pub const MSG_CPF_INVALID: &str = "CPF inválido";
pub const MSG_SELECTION_REQUIRED: &str = "Selecione uma opção";
pub const MSG_LINES_REQUIRED: &str = "Adicione ao menos um item";
pub const MSG_LINE_QUANTITY: &str = "Toda linha deve ter quantidade maior que zero";

/// Requires a non-blank text field.
pub fn require_text(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, MSG_REQUIRED.to_string());
    }
}

/// Requires a selection (non-empty option value).
pub fn require_selection(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.insert(field, MSG_SELECTION_REQUIRED.to_string());
    }
}

/// Requires a parseable number that is zero or positive.
pub fn require_non_negative(errors: &mut FieldErrors, field: &'static str, value: &str) {
    match value.trim().parse::<f64>() {
        Ok(n) if n >= 0.0 => {}
        _ => {
            errors.insert(field, MSG_NON_NEGATIVE.to_string());
        }
    }
}

/// Requires a parseable number strictly greater than zero.
pub fn require_positive(errors: &mut FieldErrors, field: &'static str, value: &str) {
    match value.trim().parse::<f64>() {
        Ok(n) if n > 0.0 => {}
        _ => {
            errors.insert(field, MSG_POSITIVE.to_string());
        }
    }
}

/// Cross-field equality for password confirmation.
pub fn require_password_match(
    errors: &mut FieldErrors,
    field: &'static str,
    senha: &str,
    confirma: &str,
) {
    if senha != confirma {
        errors.insert(field, MSG_PASSWORDS_DIFFER.to_string());
    }
}

/// Requires a structurally valid CPF.
pub fn require_cpf(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if !valid_cpf(value) {
        errors.insert(field, MSG_CPF_INVALID.to_string());
    }
}

/// CPF check-digit validation: eleven digits, not all equal, both
/// verification digits consistent with the weighted sums.
pub fn valid_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }
    check_digit(&digits[..9], 10) == digits[9] && check_digit(&digits[..10], 11) == digits[10]
}

fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=start_weight).rev())
        .map(|(d, w)| d * w)
        .sum();
    match (sum * 10) % 11 {
        10 | 11 => 0,
        rest => rest,
    }
}

/// Set-level rule for composite forms: at least one line item, every line
/// with a quantity greater than zero.
pub fn require_lines(errors: &mut FieldErrors, field: &'static str, quantities: &[f64]) {
    if quantities.is_empty() {
        errors.insert(field, MSG_LINES_REQUIRED.to_string());
    } else if quantities.iter().any(|&q| q <= 0.0) {
        errors.insert(field, MSG_LINE_QUANTITY.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf_accepts_well_formed_numbers() {
        assert!(valid_cpf("52998224725"));
        assert!(valid_cpf("529.982.247-25"), "punctuation is stripped");
        assert!(valid_cpf("11144477735"));
    }

    #[test]
    fn test_valid_cpf_rejects_repeated_digits() {
        assert!(!valid_cpf("11111111111"));
        assert!(!valid_cpf("00000000000"));
    }

    #[test]
    fn test_valid_cpf_rejects_bad_check_digits_and_length() {
        assert!(!valid_cpf("52998224726"));
        assert!(!valid_cpf("5299822472"));
        assert!(!valid_cpf(""));
        assert!(!valid_cpf("abcdefghijk"));
    }

    #[test]
    fn test_require_cpf_records_field_error() {
        let mut errors = FieldErrors::new();
        require_cpf(&mut errors, "cpf", "11111111111");
        assert_eq!(errors.get("cpf").map(String::as_str), Some(MSG_CPF_INVALID));
    }

    #[test]
    fn test_text_and_selection_rules() {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "nome", "   ");
        require_selection(&mut errors, "produto", "");
        require_text(&mut errors, "email", "a@b.com");
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("nome"));
        assert!(errors.contains_key("produto"));
    }

    #[test]
    fn test_numeric_rules() {
        let mut errors = FieldErrors::new();
        require_non_negative(&mut errors, "estoque", "0");
        require_non_negative(&mut errors, "estoque2", "-1");
        require_non_negative(&mut errors, "estoque3", "abc");
        require_positive(&mut errors, "valor", "0");
        require_positive(&mut errors, "valor2", "3.50");
        assert!(!errors.contains_key("estoque"));
        assert!(errors.contains_key("estoque2"));
        assert!(errors.contains_key("estoque3"));
        assert!(errors.contains_key("valor"));
        assert!(!errors.contains_key("valor2"));
    }

    #[test]
    fn test_password_confirmation() {
        let mut errors = FieldErrors::new();
        require_password_match(&mut errors, "confirmaSenha", "abc", "abd");
        assert_eq!(
            errors.get("confirmaSenha").map(String::as_str),
            Some(MSG_PASSWORDS_DIFFER)
        );
    }

    #[test]
    fn test_line_item_set_rules() {
        let mut errors = FieldErrors::new();
        require_lines(&mut errors, "linhas", &[]);
        assert_eq!(
            errors.get("linhas").map(String::as_str),
            Some(MSG_LINES_REQUIRED)
        );

        errors.clear();
        require_lines(&mut errors, "linhas", &[1.0, 0.0, 2.0]);
        assert_eq!(
            errors.get("linhas").map(String::as_str),
            Some(MSG_LINE_QUANTITY)
        );

        errors.clear();
        require_lines(&mut errors, "linhas", &[1.0, 2.5]);
        assert!(errors.is_empty());
    }
}
