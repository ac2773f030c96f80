/// Ключ сравнения заголовков: без пробельных символов в любом месте строки
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Правило сопоставления заголовка по ключевым словам
///
/// Заголовок проверяется в нормализованном виде и в нижнем регистре.
/// Правило срабатывает, если заголовок совпадает с одним из `exact`, либо
/// содержит хотя бы одно слово из `any`, все слова из `all` и ни одного из `none`.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: Copy> {
    pub target: T,
    pub any: &'static [&'static str],
    pub all: &'static [&'static str],
    pub none: &'static [&'static str],
    pub exact: &'static [&'static str],
}

impl<T: Copy> KeywordRule<T> {
    pub const fn any(target: T, any: &'static [&'static str]) -> Self {
        Self {
            target,
            any,
            all: &[],
            none: &[],
            exact: &[],
        }
    }

    pub const fn all(mut self, all: &'static [&'static str]) -> Self {
        self.all = all;
        self
    }

    pub const fn none(mut self, none: &'static [&'static str]) -> Self {
        self.none = none;
        self
    }

    pub const fn exact(mut self, exact: &'static [&'static str]) -> Self {
        self.exact = exact;
        self
    }

    /// `key` должен быть уже нормализован и приведён к нижнему регистру
    pub fn matches(&self, key: &str) -> bool {
        if self.exact.iter().any(|e| e.to_lowercase() == key) {
            return true;
        }
        if self.any.is_empty() && self.all.is_empty() {
            return false;
        }
        let any_hit = self.any.is_empty() || self.any.iter().any(|k| key.contains(&k.to_lowercase()));
        any_hit
            && self.all.iter().all(|k| key.contains(&k.to_lowercase()))
            && !self.none.iter().any(|k| key.contains(&k.to_lowercase()))
    }
}

/// Нормализованный ключ в нижнем регистре для [`KeywordRule::matches`]
pub fn match_key(header: &str) -> String {
    normalize(header).to_lowercase()
}

/// Первое сработавшее правило по порядку приоритета
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], header: &str) -> Option<T> {
    let key = match_key(header);
    if key.is_empty() {
        return None;
    }
    rules.iter().find(|rule| rule.matches(&key)).map(|rule| rule.target)
}
