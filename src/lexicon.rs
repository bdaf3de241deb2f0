use crate::language::Language;
use crate::tone::ToneCategory;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

type WordSet = HashSet<&'static str>;

fn word_set(words: &[&'static str]) -> WordSet {
    words.iter().copied().collect()
}

lazy_static::lazy_static! {
    static ref STOPWORDS: HashMap<Language, WordSet> = {
        let mut m = HashMap::new();
        m.insert(Language::English, word_set(&[
            "a", "about", "above", "after", "again", "against", "all", "also", "am", "an",
            "and", "any", "are", "aren't", "as", "at", "be", "because", "been", "before",
            "being", "below", "between", "both", "but", "by", "can", "can't", "cannot",
            "could", "couldn't", "did", "didn't", "do", "does", "doesn't", "doing", "don't",
            "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
            "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's",
            "her", "here", "here's", "hers", "herself", "him", "himself", "his", "how",
            "how's", "i", "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't",
            "it", "it's", "its", "itself", "just", "let's", "me", "more", "most", "mustn't",
            "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
            "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "said",
            "same", "says", "shan't", "she", "she'd", "she'll", "she's", "should",
            "shouldn't", "so", "some", "such", "than", "that", "that's", "the", "their",
            "theirs", "them", "themselves", "then", "there", "there's", "these", "they",
            "they'd", "they'll", "they're", "they've", "this", "those", "through", "to",
            "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll",
            "we're", "we've", "were", "weren't", "what", "what's", "when", "when's",
            "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's",
            "will", "with", "won't", "would", "wouldn't", "you", "you'd", "you'll",
            "you're", "you've", "your", "yours", "yourself", "yourselves",
        ]));
        m.insert(Language::Hindi, word_set(&[
            "का", "की", "के", "है", "हैं", "में", "और", "को", "से", "पर", "यह", "वह",
            "ये", "वे", "एक", "भी", "था", "थे", "थी", "नहीं", "तो", "ही", "जो", "कि",
            "लिए", "इस", "उस", "हो", "कर", "गया", "गई", "रहा", "रही", "साथ", "किया",
            "होता", "होती", "अपने", "उनके", "उसके", "इसके", "जब", "तक", "बाद", "कुछ",
        ]));
        m.insert(Language::Gujarati, word_set(&[
            "છે", "અને", "માં", "નો", "ની", "નું", "ના", "એ", "આ", "તે", "પણ", "થી",
            "કે", "જે", "હતો", "હતી", "હતા", "માટે", "પર", "એક", "તો", "જ", "છો",
            "હું", "અમે", "તમે", "તેમ", "તેના", "તેની", "આપણે", "કર્યું", "પછી",
        ]));
        m.insert(Language::Marathi, word_set(&[
            "आहे", "आहेत", "आणि", "या", "व", "ते", "ती", "हे", "की", "मध्ये", "होते",
            "होता", "होती", "आम्ही", "तुम्ही", "एक", "पण", "तर", "ना", "च", "ला", "ने",
            "चा", "ची", "चे", "साठी", "असे", "नाही", "त्या", "त्यांनी", "केले", "काही",
        ]));
        m
    };

    static ref TONE_WORDS: HashMap<(Language, ToneCategory), WordSet> = {
        use ToneCategory::{Negative, Positive, Urgent};

        let mut m = HashMap::new();
        m.insert((Language::English, Positive), word_set(&[
            "good", "great", "excellent", "amazing", "wonderful", "fantastic", "positive",
            "success", "successful", "happy", "best", "love", "beneficial", "improve",
            "improved", "progress", "hope", "win", "benefit", "breakthrough",
        ]));
        m.insert((Language::English, Negative), word_set(&[
            "bad", "terrible", "awful", "horrible", "worst", "negative", "failure", "fail",
            "hate", "crisis", "disaster", "danger", "dangerous", "threat", "fear", "corrupt",
            "scandal", "attack", "death", "loss",
        ]));
        m.insert((Language::English, Urgent), word_set(&[
            "urgent", "breaking", "immediately", "now", "alert", "emergency", "critical",
            "warning", "shocking", "must", "hurry", "deadline", "act", "asap",
        ]));

        m.insert((Language::Hindi, Positive), word_set(&[
            "अच्छा", "अच्छी", "बेहतरीन", "शानदार", "सफल", "सफलता", "खुशी", "प्रगति",
            "उत्कृष्ट", "लाभ", "विकास", "सकारात्मक", "उम्मीद",
        ]));
        m.insert((Language::Hindi, Negative), word_set(&[
            "बुरा", "खराब", "भयानक", "संकट", "खतरा", "असफल", "विफल", "नुकसान", "डर",
            "भ्रष्टाचार", "घोटाला", "नकारात्मक", "हमला",
        ]));
        m.insert((Language::Hindi, Urgent), word_set(&[
            "तुरंत", "जरूरी", "ज़रूरी", "अभी", "आपातकाल", "चेतावनी", "ब्रेकिंग", "सावधान",
            "तत्काल",
        ]));

        m.insert((Language::Gujarati, Positive), word_set(&[
            "સારું", "સારી", "ઉત્તમ", "સફળ", "સફળતા", "ખુશી", "પ્રગતિ", "લાભ", "વિકાસ",
            "સકારાત્મક", "આશા",
        ]));
        m.insert((Language::Gujarati, Negative), word_set(&[
            "ખરાબ", "ભયાનક", "સંકટ", "ખતરો", "નિષ્ફળ", "નુકસાન", "ડર", "ભ્રષ્ટાચાર",
            "કૌભાંડ", "નકારાત્મક", "હુમલો",
        ]));
        m.insert((Language::Gujarati, Urgent), word_set(&[
            "તાત્કાલિક", "જરૂરી", "હમણાં", "કટોકટી", "ચેતવણી", "સાવધાન", "તરત",
        ]));

        m.insert((Language::Marathi, Positive), word_set(&[
            "चांगले", "चांगली", "उत्तम", "यशस्वी", "यश", "आनंद", "प्रगती", "फायदा",
            "विकास", "सकारात्मक", "आशा",
        ]));
        m.insert((Language::Marathi, Negative), word_set(&[
            "वाईट", "भयानक", "संकट", "धोका", "अपयश", "नुकसान", "भीती", "भ्रष्टाचार",
            "घोटाळा", "नकारात्मक", "हल्ला",
        ]));
        m.insert((Language::Marathi, Urgent), word_set(&[
            "तातडीने", "ताबडतोब", "त्वरित", "आणीबाणी", "इशारा", "सावधान", "लगेच",
        ]));
        m
    };

    static ref EMPTY: WordSet = HashSet::new();
}

/// Look up `key`, retrying with `fallback` when the table has no entry for it
fn with_fallback<'a, K: Eq + Hash, V>(table: &'a HashMap<K, V>, key: K, fallback: K) -> Option<&'a V> {
    table.get(&key).or_else(|| table.get(&fallback))
}

/// Stopwords for `language`, English when the language has no table
pub fn stopwords(language: Language) -> &'static WordSet {
    with_fallback(&*STOPWORDS, language, Language::English).unwrap_or(&*EMPTY)
}

pub fn is_stopword(language: Language, word: &str) -> bool {
    stopwords(language).contains(word)
}

/// Tone lexicon for a `(language, category)` pair, English when the pair is missing
pub fn tone_words(language: Language, category: ToneCategory) -> &'static WordSet {
    with_fallback(
        &*TONE_WORDS,
        (language, category),
        (Language::English, category),
    )
    .unwrap_or(&*EMPTY)
}
