/// Семантический тип значения поля котировки.
///
/// На проводе все значения — строки; тип нужен потребителям (отрисовке),
/// чтобы не выводить его заново из кода поля.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Цена или сумма в валюте инструмента
    Price,
    /// Количество/объём в штуках
    Size,
    /// Изменение в пунктах
    Points,
    /// Изменение в процентах
    Percent,
    /// Время
    Time,
    /// Дата
    Date,
    /// Счётчик
    Count,
    /// Обозначение направления изменения
    Flag,
    /// Код биржи/площадки
    Venue,
    /// Произвольный текст
    Text,
}

/// Описание известного поля котировки.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    /// Короткий код поля в протоколе фида
    pub code: &'static str,
    /// Подпись для вывода
    pub label: &'static str,
    /// Семантический тип значения
    pub kind: FieldKind,
}

/// Ключ payload, по которому маршрутизируется обновление (тикер).
pub const TICKER_KEY: &str = "c";

/// Поля, для которых при отсутствии в событии подставляется последнее
/// известное значение. Набор конфигурируемый, это только значение по умолчанию.
pub const DEFAULT_FALLBACK_FIELDS: &[&str] = &["ltp", "ltt", "lts", "chg", "pcp"];

/// Каталог известных полей фида. Порядок элементов задаёт порядок вывода.
pub const FIELD_CATALOG: &[FieldInfo] = &[
    FieldInfo { code: "c", label: "Тикер", kind: FieldKind::Text },
    FieldInfo { code: "ltp", label: "Цена последней сделки", kind: FieldKind::Price },
    FieldInfo { code: "ltt", label: "Время последней сделки", kind: FieldKind::Time },
    FieldInfo { code: "ltr", label: "Биржа последней сделки", kind: FieldKind::Venue },
    FieldInfo { code: "name", label: "Название бумаги", kind: FieldKind::Text },
    FieldInfo { code: "name2", label: "Латинское название бумаги", kind: FieldKind::Text },
    FieldInfo { code: "bbp", label: "Лучший бид", kind: FieldKind::Price },
    FieldInfo { code: "bbc", label: "Обозначение изменения лучшего бида", kind: FieldKind::Flag },
    FieldInfo { code: "bbs", label: "Количество (сайз) лучшего бида", kind: FieldKind::Size },
    FieldInfo { code: "bbf", label: "Объём лучшего бида", kind: FieldKind::Size },
    FieldInfo { code: "bap", label: "Лучшее предложение", kind: FieldKind::Price },
    FieldInfo { code: "bac", label: "Обозначение изменения лучшего предложения", kind: FieldKind::Flag },
    FieldInfo { code: "bas", label: "Количество (сайз) лучшего предложения", kind: FieldKind::Size },
    FieldInfo { code: "baf", label: "Объём лучшего предложения", kind: FieldKind::Size },
    FieldInfo { code: "pp", label: "Цена предыдущего закрытия", kind: FieldKind::Price },
    FieldInfo { code: "op", label: "Цена открытия в текущей торговой сессии", kind: FieldKind::Price },
    FieldInfo { code: "lts", label: "Количество (сайз) последней сделки", kind: FieldKind::Size },
    FieldInfo { code: "chg", label: "Изменение цены последней сделки в пунктах", kind: FieldKind::Points },
    FieldInfo { code: "pcp", label: "Изменение в процентах", kind: FieldKind::Percent },
    FieldInfo { code: "ltc", label: "Обозначение изменения цены последней сделки", kind: FieldKind::Flag },
    FieldInfo { code: "mintp", label: "Минимальная цена сделки за день", kind: FieldKind::Price },
    FieldInfo { code: "maxtp", label: "Максимальная цена сделки за день", kind: FieldKind::Price },
    FieldInfo { code: "vol", label: "Объём торгов за день в штуках", kind: FieldKind::Size },
    FieldInfo { code: "vlt", label: "Объём торгов за день в валюте", kind: FieldKind::Price },
    FieldInfo { code: "yld", label: "Доходность к погашению", kind: FieldKind::Percent },
    FieldInfo { code: "acd", label: "Накопленный купонный доход (НКД)", kind: FieldKind::Price },
    FieldInfo { code: "fv", label: "Номинал", kind: FieldKind::Price },
    FieldInfo { code: "mtd", label: "Дата погашения", kind: FieldKind::Date },
    FieldInfo { code: "cpn", label: "Купон в валюте", kind: FieldKind::Price },
    FieldInfo { code: "cpp", label: "Купонный период (в днях)", kind: FieldKind::Count },
    FieldInfo { code: "ncd", label: "Дата следующего купона", kind: FieldKind::Date },
    FieldInfo { code: "ncp", label: "Дата последнего купона", kind: FieldKind::Date },
    FieldInfo { code: "dpd", label: "ГО покупки", kind: FieldKind::Price },
    FieldInfo { code: "dps", label: "ГО продажи", kind: FieldKind::Price },
    FieldInfo { code: "trades", label: "Количество сделок", kind: FieldKind::Count },
    FieldInfo { code: "min_step", label: "Минимальный шаг цены", kind: FieldKind::Price },
    FieldInfo { code: "step_price", label: "Шаг цены", kind: FieldKind::Price },
];

/// Ищет описание поля по коду.
pub fn field_info(code: &str) -> Option<&'static FieldInfo> {
    FIELD_CATALOG.iter().find(|f| f.code == code)
}

/// Подпись поля для вывода; для неизвестных кодов — сам код.
pub fn field_label(code: &str) -> &str {
    field_info(code).map(|f| f.label).unwrap_or(code)
}
