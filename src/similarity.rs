use std::collections::HashSet;

/// Distinct lowercased whitespace-delimited words, punctuation kept
fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// Intersection over union as a percentage. Two empty sets share nothing.
fn jaccard_percent(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    100.0 * intersection as f64 / union as f64
}

/// Word-set similarity of two texts, 0 to 100
pub fn similarity(a: &str, b: &str) -> f64 {
    jaccard_percent(&word_set(a), &word_set(b))
}

/// Symmetric matrix of pairwise similarities with 100 on the diagonal
pub fn similarity_matrix<S: AsRef<str>>(texts: &[S]) -> Vec<Vec<f64>> {
    let sets: Vec<HashSet<String>> = texts.iter().map(|t| word_set(t.as_ref())).collect();
    let n = sets.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 100.0;
        for j in (i + 1)..n {
            let score = jaccard_percent(&sets[i], &sets[j]);
            matrix[i][j] = score;
            matrix[j][i] = score;
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        let matrix = similarity_matrix(&["the cat sat", "the cat ran"]);
        assert_eq!(matrix, vec![vec![100.0, 50.0], vec![50.0, 100.0]]);
    }

    #[test]
    fn test_case_folds_but_keeps_punctuation() {
        assert_eq!(similarity("The Cat", "the cat"), 100.0);
        assert_eq!(similarity("cat.", "cat"), 0.0);
    }

    #[test]
    fn test_empty_texts() {
        let matrix = similarity_matrix(&["", ""]);
        assert_eq!(matrix, vec![vec![100.0, 0.0], vec![0.0, 100.0]]);

        let matrix = similarity_matrix(&["", "something"]);
        assert_eq!(matrix[0][1], 0.0);

        assert!(similarity_matrix::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let texts = [
            "officials confirmed the report on monday",
            "the report was denied by officials",
            "completely unrelated words here",
            "officials confirmed the report on monday",
            "",
        ];
        let matrix = similarity_matrix(&texts);
        for i in 0..texts.len() {
            assert_eq!(matrix[i][i], 100.0);
            for j in 0..texts.len() {
                assert_eq!(matrix[i][j], matrix[j][i]);
                assert!((0.0..=100.0).contains(&matrix[i][j]));
            }
        }
        assert_eq!(matrix[0][3], 100.0);
        assert_eq!(matrix[0][2], 0.0);
    }
}
