//! Built-in sample data shown before a file is loaded.

/// Display name of the built-in sample.
pub const SAMPLE_NAME: &str = "sample.csv";

/// Monthly sales figures.
pub const SAMPLE_CSV: &str = "Ay,Satış,Gider,Kâr,Müşteri_Memnuniyeti
Ocak,12000,8000,4000,85
Şubat,15000,9000,6000,88
Mart,11000,7500,3500,82
Nisan,18000,10000,8000,90
Mayıs,22000,11000,11000,92
Haziran,25000,12000,13000,95
Temmuz,24000,13000,11000,94
Ağustos,20000,11500,8500,89
Eylül,23000,12000,11000,91
Ekim,26000,13000,13000,93
Kasım,28000,14000,14000,96
Aralık,35000,16000,19000,98";
