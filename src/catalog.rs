use serde::Serialize;

/// One row of the static stock table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub symbol: &'static str,
    pub name: &'static str,
    pub exchange: &'static str,
    pub sector: &'static str,
    pub industry: &'static str,
    pub market_cap: &'static str,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
}

/// The subset of a record the views work with once a stock is picked.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedStock {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: String,
    pub sector: String,
}

impl From<&StockRecord> for SelectedStock {
    fn from(record: &StockRecord) -> Self {
        Self {
            symbol: record.symbol.to_string(),
            name: record.name.to_string(),
            price: record.price,
            change: record.change,
            change_percent: record.change_percent,
            volume: record.volume,
            market_cap: record.market_cap.to_string(),
            sector: record.sector.to_string(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
const fn stock(
    symbol: &'static str,
    name: &'static str,
    exchange: &'static str,
    sector: &'static str,
    industry: &'static str,
    market_cap: &'static str,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: u64,
) -> StockRecord {
    StockRecord {
        symbol,
        name,
        exchange,
        sector,
        industry,
        market_cap,
        price,
        change,
        change_percent,
        volume,
    }
}

/// Returns the full catalog in its fixed display order.
pub fn all() -> &'static [StockRecord] {
    CATALOG
}

/// First record whose symbol matches, ignoring ASCII case.
pub fn find_by_symbol(symbol: &str) -> Option<&'static StockRecord> {
    let wanted = symbol.trim();
    CATALOG.iter().find(|s| s.symbol.eq_ignore_ascii_case(wanted))
}

// Major US listings. Symbols are expected to be unique but ASML appears twice
// (once under semiconductors, once under ADRs) and lookups return the first.
#[rustfmt::skip]
static CATALOG: &[StockRecord] = &[
    // Technology - FAANG & Major Tech
    stock("AAPL", "Apple Inc.", "NASDAQ", "Technology", "Consumer Electronics", "2.8T", 178.85, 2.45, 1.39, 52_143_000),
    stock("MSFT", "Microsoft Corporation", "NASDAQ", "Technology", "Software", "2.5T", 338.50, -1.25, -0.37, 28_945_000),
    stock("GOOGL", "Alphabet Inc. Class A", "NASDAQ", "Technology", "Internet Services", "1.7T", 138.25, 3.15, 2.33, 31_827_000),
    stock("GOOG", "Alphabet Inc. Class C", "NASDAQ", "Technology", "Internet Services", "1.7T", 139.42, 3.28, 2.41, 25_634_000),
    stock("AMZN", "Amazon.com Inc.", "NASDAQ", "Consumer Discretionary", "E-commerce", "1.5T", 142.75, -0.85, -0.59, 45_219_000),
    stock("META", "Meta Platforms Inc.", "NASDAQ", "Technology", "Social Media", "792B", 312.89, -4.23, -1.33, 19_873_000),
    stock("TSLA", "Tesla Inc.", "NASDAQ", "Consumer Discretionary", "Electric Vehicles", "789B", 248.42, 12.38, 5.24, 78_543_000),
    stock("NVDA", "NVIDIA Corporation", "NASDAQ", "Technology", "Semiconductors", "1.1T", 452.67, 8.92, 2.01, 35_672_000),
    stock("NFLX", "Netflix Inc.", "NASDAQ", "Communication Services", "Streaming", "195B", 445.23, 7.89, 1.80, 4_521_000),
    // Technology - Other Major Players
    stock("ORCL", "Oracle Corporation", "NYSE", "Technology", "Software", "312B", 112.45, 1.23, 1.11, 8_934_000),
    stock("CRM", "Salesforce Inc.", "NYSE", "Technology", "Cloud Software", "245B", 248.67, -2.34, -0.93, 3_456_000),
    stock("ADBE", "Adobe Inc.", "NASDAQ", "Technology", "Software", "234B", 512.34, 5.67, 1.12, 2_134_000),
    stock("INTC", "Intel Corporation", "NASDAQ", "Technology", "Semiconductors", "198B", 47.23, -0.45, -0.94, 45_678_000),
    stock("AMD", "Advanced Micro Devices", "NASDAQ", "Technology", "Semiconductors", "187B", 115.67, 3.45, 3.07, 23_456_000),
    stock("CSCO", "Cisco Systems Inc.", "NASDAQ", "Technology", "Networking", "201B", 49.78, 0.67, 1.37, 12_345_000),
    stock("IBM", "International Business Machines", "NYSE", "Technology", "IT Services", "156B", 171.23, 2.34, 1.39, 3_456_000),
    stock("QCOM", "QUALCOMM Incorporated", "NASDAQ", "Technology", "Semiconductors", "189B", 168.45, 4.23, 2.57, 8_765_000),
    // Financial Services
    stock("JPM", "JPMorgan Chase & Co.", "NYSE", "Financial Services", "Banking", "457B", 156.74, 1.85, 1.19, 12_456_000),
    stock("BAC", "Bank of America Corp.", "NYSE", "Financial Services", "Banking", "298B", 36.78, 0.45, 1.24, 34_567_000),
    stock("WFC", "Wells Fargo & Company", "NYSE", "Financial Services", "Banking", "187B", 47.89, -0.23, -0.48, 23_456_000),
    stock("GS", "Goldman Sachs Group Inc.", "NYSE", "Financial Services", "Investment Banking", "134B", 389.45, 5.67, 1.48, 1_234_000),
    stock("MS", "Morgan Stanley", "NYSE", "Financial Services", "Investment Banking", "156B", 89.34, 1.23, 1.40, 8_765_000),
    stock("C", "Citigroup Inc.", "NYSE", "Financial Services", "Banking", "98B", 48.67, -0.34, -0.69, 15_678_000),
    stock("AXP", "American Express Company", "NYSE", "Financial Services", "Credit Services", "145B", 189.23, 2.45, 1.31, 2_345_000),
    stock("BRK.A", "Berkshire Hathaway Inc. Class A", "NYSE", "Financial Services", "Conglomerate", "789B", 523450.00, 1250.00, 0.24, 12),
    stock("BRK.B", "Berkshire Hathaway Inc. Class B", "NYSE", "Financial Services", "Conglomerate", "789B", 348.90, 0.83, 0.24, 3_456_000),
    // Healthcare & Pharmaceuticals
    stock("JNJ", "Johnson & Johnson", "NYSE", "Healthcare", "Pharmaceuticals", "445B", 171.23, 1.45, 0.85, 6_789_000),
    stock("PFE", "Pfizer Inc.", "NYSE", "Healthcare", "Pharmaceuticals", "198B", 35.67, -0.23, -0.64, 23_456_000),
    stock("UNH", "UnitedHealth Group Inc.", "NYSE", "Healthcare", "Health Insurance", "512B", 542.34, 8.90, 1.67, 2_345_000),
    stock("ABBV", "AbbVie Inc.", "NYSE", "Healthcare", "Pharmaceuticals", "287B", 162.45, 2.34, 1.46, 5_678_000),
    stock("TMO", "Thermo Fisher Scientific Inc.", "NYSE", "Healthcare", "Life Sciences", "234B", 589.67, 12.34, 2.14, 1_234_000),
    stock("ABT", "Abbott Laboratories", "NYSE", "Healthcare", "Medical Devices", "189B", 107.89, 1.67, 1.57, 4_567_000),
    stock("LLY", "Eli Lilly and Company", "NYSE", "Healthcare", "Pharmaceuticals", "678B", 712.45, 15.67, 2.25, 2_345_000),
    // Consumer Goods & Retail
    stock("WMT", "Walmart Inc.", "NYSE", "Consumer Staples", "Retail", "456B", 167.89, 2.34, 1.41, 8_765_000),
    stock("PG", "Procter & Gamble Company", "NYSE", "Consumer Staples", "Consumer Products", "367B", 154.23, 1.23, 0.80, 5_678_000),
    stock("KO", "Coca-Cola Company", "NYSE", "Consumer Staples", "Beverages", "267B", 61.45, 0.45, 0.74, 12_345_000),
    stock("PEP", "PepsiCo Inc.", "NASDAQ", "Consumer Staples", "Beverages", "234B", 169.78, 1.89, 1.13, 3_456_000),
    stock("COST", "Costco Wholesale Corporation", "NASDAQ", "Consumer Staples", "Retail", "345B", 778.90, 12.45, 1.62, 1_234_000),
    stock("HD", "Home Depot Inc.", "NYSE", "Consumer Discretionary", "Home Improvement", "345B", 324.56, 4.67, 1.46, 3_456_000),
    stock("MCD", "McDonald's Corporation", "NYSE", "Consumer Discretionary", "Restaurants", "198B", 267.89, 2.34, 0.88, 2_345_000),
    stock("NKE", "Nike Inc.", "NYSE", "Consumer Discretionary", "Apparel", "156B", 98.76, -1.23, -1.23, 6_789_000),
    // Energy & Utilities
    stock("XOM", "Exxon Mobil Corporation", "NYSE", "Energy", "Oil & Gas", "456B", 108.45, 2.34, 2.20, 15_678_000),
    stock("CVX", "Chevron Corporation", "NYSE", "Energy", "Oil & Gas", "298B", 156.78, 3.45, 2.25, 8_765_000),
    stock("COP", "ConocoPhillips", "NYSE", "Energy", "Oil & Gas", "134B", 107.89, 1.67, 1.57, 6_789_000),
    stock("NEE", "NextEra Energy Inc.", "NYSE", "Utilities", "Electric Utilities", "156B", 78.90, 0.89, 1.14, 4_567_000),
    // Industrial & Manufacturing
    stock("BA", "Boeing Company", "NYSE", "Industrials", "Aerospace", "123B", 198.45, -2.34, -1.17, 8_765_000),
    stock("CAT", "Caterpillar Inc.", "NYSE", "Industrials", "Machinery", "145B", 267.89, 3.45, 1.31, 3_456_000),
    stock("GE", "General Electric Company", "NYSE", "Industrials", "Conglomerate", "134B", 123.45, 2.34, 1.93, 12_345_000),
    stock("MMM", "3M Company", "NYSE", "Industrials", "Conglomerate", "67B", 118.90, 1.23, 1.05, 2_345_000),
    // Telecommunications & Media
    stock("VZ", "Verizon Communications Inc.", "NYSE", "Communication Services", "Telecommunications", "167B", 40.23, 0.34, 0.85, 15_678_000),
    stock("T", "AT&T Inc.", "NYSE", "Communication Services", "Telecommunications", "134B", 18.45, -0.12, -0.65, 34_567_000),
    stock("DIS", "Walt Disney Company", "NYSE", "Communication Services", "Entertainment", "189B", 103.67, 2.45, 2.42, 8_765_000),
    stock("CMCSA", "Comcast Corporation", "NASDAQ", "Communication Services", "Media", "156B", 36.78, 0.67, 1.86, 12_345_000),
    // Real Estate & REITs
    stock("AMT", "American Tower Corporation", "NYSE", "Real Estate", "REITs", "98B", 215.67, 3.45, 1.63, 1_234_000),
    stock("PLD", "Prologis Inc.", "NYSE", "Real Estate", "REITs", "89B", 119.45, 1.89, 1.61, 2_345_000),
    // Emerging Tech & Growth Stocks
    stock("SHOP", "Shopify Inc.", "NYSE", "Technology", "E-commerce Software", "78B", 62.34, 2.45, 4.09, 5_678_000),
    stock("SQ", "Block Inc.", "NYSE", "Technology", "Financial Technology", "45B", 78.90, 1.67, 2.16, 8_765_000),
    stock("PYPL", "PayPal Holdings Inc.", "NASDAQ", "Technology", "Financial Technology", "67B", 58.45, -0.89, -1.50, 12_345_000),
    stock("UBER", "Uber Technologies Inc.", "NYSE", "Technology", "Ride Sharing", "89B", 43.67, 1.23, 2.90, 15_678_000),
    stock("LYFT", "Lyft Inc.", "NASDAQ", "Technology", "Ride Sharing", "12B", 11.45, 0.34, 3.06, 6_789_000),
    stock("SNAP", "Snap Inc.", "NYSE", "Technology", "Social Media", "23B", 14.67, -0.23, -1.54, 23_456_000),
    stock("TWTR", "Twitter Inc.", "NYSE", "Technology", "Social Media", "34B", 44.28, 1.89, 4.46, 34_567_000),
    stock("SPOT", "Spotify Technology S.A.", "NYSE", "Communication Services", "Audio Streaming", "45B", 234.56, 8.90, 3.95, 1_234_000),
    stock("ZM", "Zoom Video Communications", "NASDAQ", "Technology", "Video Conferencing", "23B", 78.90, 2.34, 3.06, 3_456_000),
    stock("DOCU", "DocuSign Inc.", "NASDAQ", "Technology", "Software", "12B", 61.23, 1.45, 2.42, 2_345_000),
    // Biotech & Healthcare Innovation
    stock("GILD", "Gilead Sciences Inc.", "NASDAQ", "Healthcare", "Biotechnology", "89B", 71.23, 1.67, 2.40, 6_789_000),
    stock("BIIB", "Biogen Inc.", "NASDAQ", "Healthcare", "Biotechnology", "34B", 231.45, 5.67, 2.51, 1_234_000),
    stock("REGN", "Regeneron Pharmaceuticals", "NASDAQ", "Healthcare", "Biotechnology", "78B", 712.34, 12.45, 1.78, 567_000),
    stock("VRTX", "Vertex Pharmaceuticals Inc.", "NASDAQ", "Healthcare", "Biotechnology", "89B", 345.67, 8.90, 2.64, 1_234_000),
    // Semiconductor & Hardware
    stock("TSM", "Taiwan Semiconductor Mfg.", "NYSE", "Technology", "Semiconductors", "456B", 89.45, 2.34, 2.69, 23_456_000),
    stock("ASML", "ASML Holding N.V.", "NASDAQ", "Technology", "Semiconductor Equipment", "234B", 567.89, 12.34, 2.22, 1_234_000),
    stock("AVGO", "Broadcom Inc.", "NASDAQ", "Technology", "Semiconductors", "345B", 823.45, 15.67, 1.94, 2_345_000),
    stock("TXN", "Texas Instruments Inc.", "NASDAQ", "Technology", "Semiconductors", "156B", 169.78, 2.34, 1.40, 3_456_000),
    stock("MU", "Micron Technology Inc.", "NASDAQ", "Technology", "Memory Chips", "89B", 78.90, 1.67, 2.16, 12_345_000),
    // Electric Vehicle & Clean Energy
    stock("NIO", "NIO Inc.", "NYSE", "Consumer Discretionary", "Electric Vehicles", "23B", 14.56, 0.89, 6.51, 45_678_000),
    stock("XPEV", "XPeng Inc.", "NYSE", "Consumer Discretionary", "Electric Vehicles", "12B", 11.23, 0.45, 4.17, 23_456_000),
    stock("LI", "Li Auto Inc.", "NASDAQ", "Consumer Discretionary", "Electric Vehicles", "34B", 32.45, 1.67, 5.42, 15_678_000),
    stock("RIVN", "Rivian Automotive Inc.", "NASDAQ", "Consumer Discretionary", "Electric Vehicles", "45B", 48.90, 2.34, 5.02, 34_567_000),
    stock("LCID", "Lucid Group Inc.", "NASDAQ", "Consumer Discretionary", "Electric Vehicles", "12B", 7.89, 0.23, 3.00, 23_456_000),
    // Cryptocurrency & Blockchain
    stock("COIN", "Coinbase Global Inc.", "NASDAQ", "Financial Services", "Cryptocurrency Exchange", "23B", 89.45, 4.56, 5.37, 8_765_000),
    stock("MSTR", "MicroStrategy Inc.", "NASDAQ", "Technology", "Business Intelligence", "12B", 678.90, 23.45, 3.58, 1_234_000),
    // Gaming & Entertainment
    stock("ATVI", "Activision Blizzard Inc.", "NASDAQ", "Communication Services", "Video Games", "67B", 86.45, 1.23, 1.44, 5_678_000),
    stock("EA", "Electronic Arts Inc.", "NASDAQ", "Communication Services", "Video Games", "34B", 123.45, 2.34, 1.93, 2_345_000),
    stock("TTWO", "Take-Two Interactive Software", "NASDAQ", "Communication Services", "Video Games", "23B", 134.56, 3.45, 2.63, 1_234_000),
    stock("RBLX", "Roblox Corporation", "NYSE", "Communication Services", "Gaming Platform", "12B", 19.78, 0.89, 4.71, 15_678_000),
    // Cloud & Enterprise Software
    stock("NOW", "ServiceNow Inc.", "NYSE", "Technology", "Cloud Software", "123B", 612.34, 15.67, 2.63, 1_234_000),
    stock("SNOW", "Snowflake Inc.", "NYSE", "Technology", "Cloud Data", "67B", 201.45, 8.90, 4.62, 3_456_000),
    stock("PLTR", "Palantir Technologies Inc.", "NYSE", "Technology", "Data Analytics", "34B", 16.78, 0.67, 4.16, 23_456_000),
    stock("CRWD", "CrowdStrike Holdings Inc.", "NASDAQ", "Technology", "Cybersecurity", "45B", 189.45, 6.78, 3.71, 2_345_000),
    stock("ZS", "Zscaler Inc.", "NASDAQ", "Technology", "Cybersecurity", "23B", 167.89, 5.67, 3.50, 1_234_000),
    // E-commerce & Retail Tech
    stock("BABA", "Alibaba Group Holding Ltd.", "NYSE", "Consumer Discretionary", "E-commerce", "234B", 89.45, 2.34, 2.69, 23_456_000),
    stock("JD", "JD.com Inc.", "NASDAQ", "Consumer Discretionary", "E-commerce", "45B", 28.90, 1.23, 4.45, 8_765_000),
    stock("PDD", "PDD Holdings Inc.", "NASDAQ", "Consumer Discretionary", "E-commerce", "123B", 98.76, 4.56, 4.84, 12_345_000),
    stock("MELI", "MercadoLibre Inc.", "NASDAQ", "Consumer Discretionary", "E-commerce", "67B", 1345.67, 45.89, 3.53, 567_000),
    // International ADRs
    stock("ASML", "ASML Holding N.V.", "NASDAQ", "Technology", "Semiconductor Equipment", "234B", 567.89, 12.34, 2.22, 1_234_000),
    stock("SAP", "SAP SE", "NYSE", "Technology", "Enterprise Software", "156B", 128.45, 2.34, 1.86, 2_345_000),
    stock("TM", "Toyota Motor Corporation", "NYSE", "Consumer Discretionary", "Automotive", "234B", 167.89, 3.45, 2.10, 3_456_000),
    stock("SONY", "Sony Group Corporation", "NYSE", "Consumer Discretionary", "Electronics", "89B", 78.90, 1.67, 2.16, 4_567_000),
    stock("NVS", "Novartis AG", "NYSE", "Healthcare", "Pharmaceuticals", "198B", 89.45, 1.23, 1.39, 2_345_000),
];
