pub(crate) trait StringExt {
    fn push_join(&mut self, separator: &str, items: impl IntoIterator<Item = impl AsRef<str>>);

    /// Pushes `word` with its first character upper-cased and the rest lower-cased.
    fn push_capitalized(&mut self, word: &str);
}

impl StringExt for String {
    fn push_join(&mut self, separator: &str, items: impl IntoIterator<Item = impl AsRef<str>>) {
        for (idx, v) in items.into_iter().enumerate() {
            if idx > 0 {
                self.push_str(separator);
            }
            self.push_str(v.as_ref());
        }
    }

    fn push_capitalized(&mut self, word: &str) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            self.extend(first.to_uppercase());
            for c in chars {
                self.extend(c.to_lowercase());
            }
        }
    }
}
